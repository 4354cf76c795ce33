//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes text analysis over the MCP protocol, making it
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same [`Analyzer`]
//! the CLI commands use, built once at startup from the configured stopword
//! list and phrase dictionary. Each `#[tool]` method delegates to core
//! library functions rather than implementing analysis itself.
//!
//! # Adding Tools
//!
//! 1. Define a parameter struct with `Deserialize` + `JsonSchema`
//! 2. Add a `#[tool(description = "...")]` method to the `#[tool_router]` impl
//! 3. Call core library functions, convert errors to `McpError`
//! 4. Return `CallToolResult::success(vec![Content::text(...)])`

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use lexitox_core::config::DEFAULT_TOP_WORDS;
use lexitox_core::sort;
use lexitox_core::{Analyzer, ResultComparison, SortAlgorithm, top_words};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Keep only this many ranked words in the response.
    pub max_words: Option<usize>,
}

/// Parameters for the `detect_toxicity` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DetectToxicityParams {
    /// The text to scan.
    pub text: String,
    /// Number of most frequent phrases to list (default 10).
    pub top: Option<usize>,
    /// Report `over_max` when the score exceeds this value.
    pub max_score: Option<u32>,
}

/// Parameters for the `top_words` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TopWordsParams {
    /// The text to analyze.
    pub text: String,
    /// Number of words to return.
    pub count: Option<usize>,
    /// Ranking algorithm: "bubble", "quick" or "merge".
    pub algorithm: Option<SortAlgorithm>,
    /// Also check whether all three algorithms produce the same order.
    #[serde(default)]
    pub compare_algorithms: bool,
}

/// Parameters for the `compare_texts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CompareTextsParams {
    /// The first text.
    pub first: String,
    /// The second text.
    pub second: String,
    /// Name used for the first text in conclusions.
    pub first_name: Option<String>,
    /// Name used for the second text in conclusions.
    pub second_name: Option<String>,
}

#[derive(Serialize)]
struct ToxicityResponse<'a> {
    enabled: bool,
    #[serde(flatten)]
    report: &'a lexitox_core::ToxicityReport,
    most_toxic: Vec<lexitox_core::DetectedPhrase>,
    over_max: bool,
}

#[derive(Serialize)]
struct TopWordsResponse {
    #[serde(flatten)]
    top: lexitox_core::TopWords,
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm_comparison: Option<sort::SortComparison>,
}

#[derive(Serialize)]
struct CompareResponse {
    #[serde(flatten)]
    comparison: ResultComparison,
    conclusions: Vec<String>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing text analysis to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    analyzer: Arc<Analyzer>,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(Analyzer::default(), None)
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server around a loaded analyzer.
    pub fn new(analyzer: Analyzer, max_input_bytes: Option<usize>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(limit) if text.len() > limit => Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {limit} bytes)",
                    text.len()
                ),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, description and dictionary status")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "toxicity_enabled": self.analyzer.toxicity_enabled(),
            "toxic_phrases": self.analyzer.dictionary().len(),
            "stopwords": self.analyzer.stopwords().len(),
            "sort_algorithm": self.analyzer.sort_algorithm(),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}\n{} toxic phrases, {} stopwords",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.analyzer.dictionary().len(),
                self.analyzer.stopwords().len(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Full analysis of one text.
    #[tool(
        description = "Analyze text: word, sentence and line counts, ranked word frequencies, lexical diversity, reading level and toxicity."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_text", max_words = ?params.max_words, "executing MCP tool");
        self.check_size(&params.text)?;

        let mut result = self.analyzer.analyze(&params.text);
        if let Some(max) = params.max_words {
            result.words.truncate(max);
        }
        let json = to_json(&result)?;

        tracing::info!(
            tool = "analyze_text",
            word_count = result.word_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Toxic phrase detection and scoring.
    #[tool(
        description = "Detect toxic phrases in text. Returns matched phrases with severity and counts, density, a 0-100 score, level and risk assessment."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn detect_toxicity(
        &self,
        Parameters(params): Parameters<DetectToxicityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "detect_toxicity", max_score = ?params.max_score, "executing MCP tool");
        self.check_size(&params.text)?;

        let result = self.analyzer.analyze(&params.text);
        let report = &result.toxicity;
        let response = ToxicityResponse {
            enabled: result.toxicity_enabled,
            report,
            most_toxic: report.most_toxic(params.top.unwrap_or(10)),
            over_max: params.max_score.is_some_and(|max| report.score > max),
        };
        let json = to_json(&response)?;

        tracing::info!(
            tool = "detect_toxicity",
            score = report.score,
            phrases = report.toxic_phrase_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Most frequent words.
    #[tool(
        description = "Rank the most frequent non-stopword words of a text with bubble, quick or merge sort, and report coverage."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn top_words(
        &self,
        Parameters(params): Parameters<TopWordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "top_words", count = ?params.count, "executing MCP tool");
        self.check_size(&params.text)?;

        let result = self.analyzer.analyze(&params.text);
        let algorithm = params
            .algorithm
            .unwrap_or_else(|| self.analyzer.sort_algorithm());
        let top = top_words(&result, params.count.unwrap_or(DEFAULT_TOP_WORDS), algorithm);
        let algorithm_comparison = if params.compare_algorithms {
            sort::compare_algorithms(&result.words)
        } else {
            None
        };
        let json = to_json(&TopWordsResponse {
            top,
            algorithm_comparison,
        })?;

        tracing::info!(tool = "top_words", %algorithm, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Side-by-side comparison of two texts.
    #[tool(
        description = "Compare two texts: differences in vocabulary, sentence length and toxicity, with plain-language conclusions."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compare_texts(
        &self,
        Parameters(params): Parameters<CompareTextsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "compare_texts", "executing MCP tool");
        self.check_size(&params.first)?;
        self.check_size(&params.second)?;

        let first = self.analyzer.analyze(&params.first);
        let second = self.analyzer.analyze(&params.second);
        let comparison = ResultComparison::new(&first, &second);
        let conclusions = comparison.conclusions(
            params.first_name.as_deref().unwrap_or("first"),
            params.second_name.as_deref().unwrap_or("second"),
        );
        let json = to_json(&CompareResponse {
            comparison,
            conclusions,
        })?;

        tracing::info!(tool = "compare_texts", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use tools to analyze word frequency, readability and toxic phrases in text.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
