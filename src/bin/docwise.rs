//! CLI binary for docwise.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalysisConfig`, runs one scan, and renders the structured result.

use anyhow::{Context, Result};
use clap::Parser;
use docwise::{
    analyze, ingest_files, normalize_files, normalize_text, AnalysisConfig, InputItem, Persona,
    ScanOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyse one document
  docwise lease.pdf

  # Compare two offers (2+ inputs switch to comparison mode)
  docwise offer_a.pdf offer_b.pdf

  # Analyse a page by URL (live web retrieval)
  docwise https://example.com/terms-of-service

  # Paste text directly
  docwise --text "No refunds under any circumstances."

  # Student persona, Spanish output
  docwise --persona student --language Spanish tuition_contract.pdf

  # Structured JSON instead of the terminal report
  docwise --json lease.pdf > result.json

INPUTS:
  Positional inputs may be file paths (PDF, JPEG, PNG, WEBP; 10 MiB max
  each) or HTTP/HTTPS URLs. Files that fail validation are skipped with a
  warning; the scan proceeds with the rest. When files, URLs and --text are
  mixed, documents are submitted files-first, then URLs, then the text.

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY      Service API key (required)
  DOCWISE_PERSONA     Default --persona
  DOCWISE_LANGUAGE    Default --language
  DOCWISE_MODEL       Pin both model variants
  DOCWISE_API_TIMEOUT Default --api-timeout

SETUP:
  1. Set API key:   export GEMINI_API_KEY=...
  2. Scan:          docwise contract.pdf
"#;

/// Analyse contracts, terms and offers with a hosted LLM.
#[derive(Parser, Debug)]
#[command(
    name = "docwise",
    version,
    about = "Analyse contracts, terms and offers with a hosted LLM",
    long_about = "Scan legal documents (PDF/image files, pasted text, or URLs) for risk scores, \
red flags, financial terms, critical dates, and plain-language clause explanations. \
Two or more inputs are compared side by side with a declared winner.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// File paths (PDF, JPEG, PNG, WEBP) or HTTP/HTTPS URLs.
    inputs: Vec<String>,

    /// Analyse pasted text instead of (or alongside) files.
    #[arg(long)]
    text: Option<String>,

    /// User persona biasing the analysis toward relevant warnings.
    #[arg(long, env = "DOCWISE_PERSONA", value_enum, default_value = "individual")]
    persona: PersonaArg,

    /// Target output language (free-form label).
    #[arg(long, env = "DOCWISE_LANGUAGE", default_value = "Simple English")]
    language: String,

    /// Pin both model variants to a single model ID.
    #[arg(
        long,
        env = "DOCWISE_MODEL",
        long_help = "Pin both model variants to one model ID. By default single-document scans \
use gemini-3-flash-preview and comparisons/URL scans use gemini-3-pro-preview."
    )]
    model: Option<String>,

    /// Output the structured result as pretty JSON instead of a report.
    #[arg(long, env = "DOCWISE_JSON")]
    json: bool,

    /// Transport timeout for the analysis call, in seconds.
    #[arg(long, env = "DOCWISE_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Disable the progress spinner.
    #[arg(long, env = "DOCWISE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCWISE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long, env = "DOCWISE_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum PersonaArg {
    Individual,
    SmallBusiness,
    Student,
    Freelancer,
}

impl From<PersonaArg> for Persona {
    fn from(v: PersonaArg) -> Self {
        match v {
            PersonaArg::Individual => Persona::Individual,
            PersonaArg::SmallBusiness => Persona::SmallBusiness,
            PersonaArg::Student => Persona::Student,
            PersonaArg::Freelancer => Persona::Freelancer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Gather inputs: files-first, then URLs, then pasted text ─────────
    let (urls, paths): (Vec<&String>, Vec<&String>) = cli
        .inputs
        .iter()
        .partition(|s| s.starts_with("http://") || s.starts_with("https://"));

    let file_set = ingest_files(&paths).await;
    for rejection in file_set.rejections() {
        eprintln!("{} {}", yellow("⚠"), rejection.user_message());
    }

    let mut inputs: Vec<InputItem> = normalize_files(file_set.into_accepted());
    inputs.extend(urls.iter().map(|u| normalize_text(u.as_str())));
    if let Some(ref text) = cli.text {
        inputs.push(normalize_text(text));
    }

    if inputs.is_empty() {
        anyhow::bail!("No usable inputs. Provide at least one file, URL, or --text.");
    }

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = AnalysisConfig::builder()
        .persona(cli.persona.clone().into())
        .target_language(cli.language.as_str())
        .api_timeout_secs(cli.api_timeout);
    if let Some(ref model) = cli.model {
        builder = builder.model(model.as_str());
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run the scan ─────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Analyzing");
        bar.set_message(format!(
            "{} document(s), this can take a while…",
            inputs.len()
        ));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let outcome = analyze(&inputs, &config).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let outcome = outcome.context("Document analysis failed")?;

    // ── Render ───────────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialise result")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        render_outcome(&mut handle, &outcome).context("Failed to write report")?;
    }

    Ok(())
}

// ── Terminal report rendering ─────────────────────────────────────────────

fn risk_colour(score: i64, label: &str) -> String {
    match score {
        0..=33 => green(label),
        34..=66 => yellow(label),
        _ => red(label),
    }
}

fn render_outcome(w: &mut impl Write, outcome: &ScanOutcome) -> io::Result<()> {
    match outcome {
        ScanOutcome::Single(doc) => render_doc(w, doc)?,
        ScanOutcome::Comparison(cmp) => {
            for doc in &cmp.docs {
                render_doc(w, doc)?;
                writeln!(w)?;
            }

            writeln!(w, "{}", bold("═══ Comparison ═══"))?;
            writeln!(w, "{}", cmp.comparison_summary)?;
            writeln!(w)?;
            writeln!(
                w,
                "{} {}  {}",
                bold("Winner:"),
                green(&cmp.winner),
                dim(&cmp.winner_reason)
            )?;

            if !cmp.comparison_table.is_empty() {
                writeln!(w)?;
                for row in &cmp.comparison_table {
                    writeln!(w, "  {}  {}", bold(&row.feature), row.values.join("  │  "))?;
                }
            }
        }
    }
    Ok(())
}

fn render_doc(w: &mut impl Write, doc: &docwise::AnalysisResult) -> io::Result<()> {
    let name = doc.file_name.as_deref().unwrap_or("Document");
    writeln!(w, "{}", bold(&format!("── {name} ──")))?;
    writeln!(
        w,
        "Risk: {}  ({})   Verdict: {}",
        risk_colour(doc.risk_score, &format!("{}/100", doc.risk_score)),
        doc.risk_level,
        bold(&doc.verdict.to_string()),
    )?;
    if !doc.verdict_reason.is_empty() {
        writeln!(w, "{}", dim(&doc.verdict_reason))?;
    }
    if doc.scam_risk_score > 0 {
        writeln!(
            w,
            "Scam risk: {}",
            risk_colour(doc.scam_risk_score, &format!("{}/100", doc.scam_risk_score))
        )?;
        if let Some(ref scam) = doc.scam_analysis {
            writeln!(w, "{}", dim(scam))?;
        }
    }

    if !doc.one_page_summary.is_empty() {
        writeln!(w, "\n{}", doc.one_page_summary)?;
    } else if !doc.summary.is_empty() {
        writeln!(w, "\n{}", doc.summary)?;
    }

    if !doc.red_flags.is_empty() {
        writeln!(w, "\n{}", bold("Red flags"))?;
        for flag in &doc.red_flags {
            let sev = match flag.severity {
                docwise::Severity::High => red("HIGH"),
                docwise::Severity::Medium => yellow("MED "),
                docwise::Severity::Low => dim("LOW "),
            };
            let one_sided = if flag.one_sided == Some(true) {
                cyan(" [one-sided]")
            } else {
                String::new()
            };
            writeln!(w, "  {sev} {}{one_sided}", bold(&flag.title))?;
            writeln!(w, "       {}", flag.description)?;
            if let Some(ref loc) = flag.location {
                writeln!(w, "       {}", dim(loc))?;
            }
        }
    }

    if !doc.financial_breakdown.is_empty() {
        writeln!(w, "\n{}", bold("Financial terms"))?;
        for item in &doc.financial_breakdown {
            let freq = item
                .frequency
                .as_deref()
                .map(|f| format!(" ({f})"))
                .unwrap_or_default();
            writeln!(w, "  {}  {}{}", item.label, bold(&item.value), dim(&freq))?;
        }
    }

    if !doc.important_dates.is_empty() {
        writeln!(w, "\n{}", bold("Important dates"))?;
        for d in &doc.important_dates {
            let marker = if d.deadline { red("deadline") } else { dim("date") };
            writeln!(w, "  {}  {}  {}", d.date, d.event, marker)?;
        }
    }

    if !doc.clauses.is_empty() {
        writeln!(w, "\n{}", bold("Clauses, simplified"))?;
        for clause in &doc.clauses {
            let impact = match clause.impact {
                docwise::ClauseImpact::Positive => green("+"),
                docwise::ClauseImpact::Neutral => dim("·"),
                docwise::ClauseImpact::Negative => red("−"),
            };
            writeln!(w, "  {impact} {}", bold(&clause.original_title))?;
            writeln!(w, "    {}", clause.simplified_explanation)?;
        }
    }

    if !doc.questions_to_ask.is_empty() {
        writeln!(w, "\n{}", bold("Questions to ask"))?;
        for q in &doc.questions_to_ask {
            writeln!(w, "  • {q}")?;
        }
    }

    if !doc.personalized_warnings.is_empty() {
        writeln!(w, "\n{}", bold("For you specifically"))?;
        for warning in &doc.personalized_warnings {
            writeln!(w, "  {} {}", yellow("⚠"), warning)?;
        }
    }

    Ok(())
}
