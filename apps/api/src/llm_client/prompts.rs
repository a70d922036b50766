// Cross-cutting prompt fragments shared by every prompt builder.
// The tagged segment markers are a wire contract: the extractor depends on them verbatim.

/// Opens the generated LaTeX document segment.
pub const LATEX_RESUME_MARKER: &str = "===LATEX_RESUME===";

/// Opens the improvements segment, which runs to the end of the reply.
pub const IMPROVEMENTS_MARKER: &str = "===IMPROVEMENTS===";

/// Returned in place of improvements when the reply does not honor the markers.
pub const NO_IMPROVEMENTS_SENTINEL: &str = "No specific improvements identified.";

/// Two-section output contract embedded in the generation instruction.
pub const OUTPUT_CONTRACT: &str = "IMPORTANT: You must provide TWO responses:
1. A complete LaTeX resume document
2. A detailed analysis of improvements and suggestions

RESPONSE FORMAT:
===LATEX_RESUME===
[Complete LaTeX document here]
===IMPROVEMENTS===
[Detailed improvements and suggestions here]";
