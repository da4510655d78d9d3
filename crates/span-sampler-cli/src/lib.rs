//! Command-line runtime for the span sampler visualiser.
//!
//! The runtime parses arguments, layers configuration, parses the input
//! file with Tree-sitter, samples spans with the selected policy, and
//! renders them. It is driven from the binary entrypoint and from tests,
//! where the IO streams are substituted.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::process::ExitCode;

use clap::Parser as _;
use rand::SeedableRng;
use rand::rngs::StdRng;
use span_sampler::{
    FunctionScopePolicy, LanguagePolicy, ParseResult, Parser, RestrictToLines, SampledSpan,
    SamplingConfig, SamplingPolicy, SupportedLanguage, sample,
};

mod cli;
mod config;
mod errors;
pub mod output;
mod telemetry;

use cli::{Cli, PolicyKind};
use config::Config;
use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat};
use output::{ContextError, SpanRecord, expand_to_full_lines, render_human, span_with_context};

/// Bundles the IO streams provided to the CLI runtime.
struct IoStreams<'a, W: Write, E: Write> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    stdout_is_terminal: bool,
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// `stdout_is_terminal` selects the human renderer for `--output auto` and
/// enables highlighting.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams {
        stdout,
        stderr,
        stdout_is_terminal,
    };

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            // Help and version requests.
            return match write!(io.stdout, "{error}") {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            };
        }
        Err(error) => return report(&mut io, &AppError::CliUsage(error)),
    };

    match execute(&cli, &mut io) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&mut io, &error),
    }
}

fn report<W: Write, E: Write>(io: &mut IoStreams<'_, W, E>, error: &AppError) -> ExitCode {
    // Nothing else can be done if stderr is gone.
    drop(writeln!(io.stderr, "{error}"));
    ExitCode::FAILURE
}

fn execute<W: Write, E: Write>(cli: &Cli, io: &mut IoStreams<'_, W, E>) -> Result<(), AppError> {
    let config = Config::resolve(cli)?;
    let log_format = telemetry::initialise(&config)?;
    tracing::debug!(%log_format, "logging initialised");

    let language = detect_language(cli)?;
    let source = fs::read_to_string(&cli.input).map_err(|source| AppError::ReadInput {
        path: cli.input.clone(),
        source,
    })?;
    let parsed = Parser::new(language)?.parse(&source)?;
    tracing::debug!(
        nodes = parsed.tree().root_node().descendant_count(),
        %language,
        "parsed input"
    );
    if parsed.has_errors() {
        tracing::warn!(
            path = %cli.input.display(),
            %language,
            "input contains syntax errors; sampling the recovered tree"
        );
    }

    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let sampling = config.sampling();
    let spans = match cli.policy {
        PolicyKind::Holes => sample_with(
            LanguagePolicy::for_language(language),
            &cli.lines,
            &parsed,
            &sampling,
            &mut rng,
        )?,
        PolicyKind::Functions => sample_with(
            FunctionScopePolicy::for_language(language),
            &cli.lines,
            &parsed,
            &sampling,
            &mut rng,
        )?,
    };

    if spans.is_empty() {
        tracing::warn!(path = %cli.input.display(), "no eligible spans found");
        return Ok(());
    }

    let format = cli.output.resolve(io.stdout_is_terminal);
    for span in &spans {
        let Some(range) = span_range(span, parsed.source(), cli.whole_lines)? else {
            tracing::warn!(
                start = span.start_pos,
                "a span that is not a full line was sampled and skipped"
            );
            continue;
        };
        write_span(io, format, span, range, &parsed, config.context_chars)?;
    }
    io.stdout.flush()?;
    Ok(())
}

fn detect_language(cli: &Cli) -> Result<SupportedLanguage, AppError> {
    cli.language
        .or_else(|| SupportedLanguage::from_path(&cli.input))
        .ok_or_else(|| AppError::UnknownLanguage {
            path: cli.input.clone(),
        })
}

/// Samples with `policy`, restricted to `lines` when any are given.
fn sample_with<'tree, P: SamplingPolicy>(
    policy: P,
    lines: &[u32],
    parsed: &'tree ParseResult,
    config: &SamplingConfig,
    rng: &mut StdRng,
) -> Result<Vec<SampledSpan<'tree>>, AppError> {
    let root = parsed.root_node();
    let source = parsed.source().as_bytes();
    let spans = if lines.is_empty() {
        sample(root, source, &policy, config, rng)?
    } else {
        let restricted = RestrictToLines::new(policy, lines.iter().copied());
        sample(root, source, &restricted, config, rng)?
    };
    Ok(spans)
}

/// Returns the byte range to render for `span`, or `None` when whole lines
/// were requested and the span does not start a line.
fn span_range(
    span: &SampledSpan<'_>,
    source: &str,
    whole_lines: bool,
) -> Result<Option<Range<usize>>, AppError> {
    let range = span.start_pos..span.end_pos;
    if !whole_lines {
        return Ok(Some(range));
    }
    match expand_to_full_lines(source.as_bytes(), range) {
        Ok(expanded) => Ok(Some(expanded)),
        Err(ContextError::NotFullLine { .. }) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn write_span<W: Write, E: Write>(
    io: &mut IoStreams<'_, W, E>,
    format: ResolvedOutputFormat,
    span: &SampledSpan<'_>,
    range: Range<usize>,
    parsed: &ParseResult,
    context_chars: usize,
) -> Result<(), AppError> {
    let source = parsed.source();
    let language = parsed.language();
    match format {
        ResolvedOutputFormat::Human => {
            let header = SpanRecord::new(span, range.clone(), source).header(language);
            let context = span_with_context(source, range, context_chars)?;
            io.stdout
                .write_all(render_human(&header, &context, io.stdout_is_terminal).as_bytes())?;
        }
        ResolvedOutputFormat::Json => {
            let record = SpanRecord::new(span, range, source);
            let line = serde_json::to_string(&record).map_err(AppError::Serialise)?;
            writeln!(io.stdout, "{line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
