use std::fs;
use anyhow::{anyhow, bail, Context, Result};
use bpaf::*;
use dotenv::dotenv;
use log::{error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use vtu_results::config::Settings;
use vtu_results::models::{AcademicRecord, ResultType, Scheme};
use vtu_results::utils::catalog::{self, EXAMS};
use vtu_results::utils::fetch::{fetch_batch_report, fetch_record, HttpResultSource};
use vtu_results::utils::parser::extract;
use vtu_results::utils::report::{render_record, render_summary};

// Where the result page URL comes from: given directly, or picked from the exam catalog.
#[derive(Debug, Clone)]
struct SourceArgs {
    url: Option<String>,
    exam: Option<String>,
    result_type: ResultType,
    scheme: Scheme,
}

impl SourceArgs {
    fn resolve(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        let exam_id = self.exam.as_deref().ok_or_else(|| anyhow!("Pass either --url or --exam"))?;
        let event = catalog::find_event(exam_id).with_context(|| format!("Unknown exam `{}`, see `exams`", exam_id))?;
        catalog::resolve_url(event.year, event.id, self.result_type, self.scheme)
            .map(str::to_string)
            .with_context(|| format!("{} has no {} {} results", event.title, self.result_type, self.scheme))
    }
}

#[derive(Debug, Clone)]
enum Cmd {
    Single { usn: String, source: SourceArgs, credits: Vec<String> },
    Batch { start: String, end: String, source: SourceArgs },
    Parse { file: String, usn: Option<String>, credits: Vec<String> },
    Exams { year: Option<String> },
}

fn options() -> OptionParser<Cmd> {
    fn source() -> impl Parser<SourceArgs> {
        let url = long("url").short('u').help("Result page URL").argument::<String>("URL").optional();
        let exam = long("exam").short('e').help("Exam id from the catalog, instead of --url").argument::<String>("EXAM").optional();
        let result_type = long("type").help("Regular or Revaluation").argument::<ResultType>("TYPE").fallback(ResultType::Regular);
        let scheme = long("scheme").help("CBCS, Non-CBCS or Main").argument::<Scheme>("SCHEME").fallback(Scheme::Cbcs);
        construct!(SourceArgs { url, exam, result_type, scheme })
    }

    fn credits() -> impl Parser<Vec<String>> {
        long("credits").short('c').help("Credit weight of a subject, e.g. 18CS51=4").argument::<String>("CODE=N").many()
    }

    let single = {
        let usn = positional::<String>("USN").help("University seat number");
        let source = source();
        let credits = credits();
        construct!(Cmd::Single { usn, source, credits })
            .to_options()
            .command("single")
            .help("Fetch and show one result")
    };

    let batch = {
        let start = positional::<String>("START").help("First USN of the range");
        let end = positional::<String>("END").help("Last USN of the range");
        let source = source();
        construct!(Cmd::Batch { start, end, source })
            .to_options()
            .command("batch")
            .help("Fetch every result in a USN range (max 50)")
    };

    let parse = {
        let file = positional::<String>("FILE").help("Saved result page");
        let usn = long("usn").help("USN to use when the page does not print one").argument::<String>("USN").optional();
        let credits = credits();
        construct!(Cmd::Parse { file, usn, credits })
            .to_options()
            .command("parse")
            .help("Extract a result from a saved HTML page")
    };

    let exams = {
        let year = long("year").short('y').help("Only exams of this year").argument::<String>("YEAR").optional();
        construct!(Cmd::Exams { year })
            .to_options()
            .command("exams")
            .help("List known exams and their result pages")
    };

    construct!([single, batch, parse, exams])
        .to_options()
        .descr("VTU result extraction and SGPA calculator")
}

// Applies `CODE=N` credit assignments to a record.
fn apply_credits(record: &mut AcademicRecord, credits: &[String]) -> Result<()> {
    for pair in credits {
        let (code, value) = pair.split_once('=').with_context(|| format!("Expected CODE=N, got `{}`", pair))?;
        let value: u32 = value.trim().parse().with_context(|| format!("Credits for {} must be a whole number", code))?;
        if !record.set_credits(code.trim(), value) {
            warn!("No subject {} in result for {}", code.trim(), record.identifier);
        }
    }
    Ok(())
}

async fn run(cmd: Cmd, settings: &Settings) -> Result<()> {
    match cmd {
        Cmd::Single { usn, source, credits } => {
            let url = source.resolve()?;
            let client = HttpResultSource::new(settings).context("Failed to build the client")?;
            let mut record = fetch_record(&client, &usn, &url).await?;
            apply_credits(&mut record, &credits)?;
            print!("{}", render_record(&record));
        }
        Cmd::Batch { start, end, source } => {
            let url = source.resolve()?;
            let client = HttpResultSource::new(settings).context("Failed to build the client")?;
            let report = fetch_batch_report(&client, &start, &end, &url).await?;
            for (usn, html) in &report.pages {
                match extract(html, usn) {
                    Ok(record) => println!("{}", render_summary(&record)),
                    Err(e) => println!("{:<12} {}", usn, e),
                }
            }
            let missing: Vec<&str> = report.missing().collect();
            if !missing.is_empty() {
                println!("Not fetched: {}", missing.join(", "));
            }
        }
        Cmd::Parse { file, usn, credits } => {
            let html = fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file))?;
            let mut record = extract(&html, usn.as_deref().unwrap_or(""))?;
            apply_credits(&mut record, &credits)?;
            print!("{}", render_record(&record));
        }
        Cmd::Exams { year } => {
            let mut shown = 0;
            for event in EXAMS.iter().filter(|e| year.as_deref().map_or(true, |y| e.year == y)) {
                println!("{} [{}] {} ({}, {})", event.year, event.id, event.title, event.session, event.program);
                for link in event.links {
                    println!("    {:<12} {:<9} {}", link.result_type.to_string(), link.scheme.to_string(), link.url);
                }
                shown += 1;
            }
            if shown == 0 {
                bail!("No exams for {}, known years: {}", year.unwrap_or_default(), catalog::years().join(", "));
            }
        }
    }
    Ok(())
}

// Entry point for the async main function, powered by tokio runtime.
#[tokio::main]
async fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let cmd = options().run();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = TermLogger::init(settings.log_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("Logging unavailable: {}", e);
    }
    info!("Using result service at {}", settings.endpoint());

    if let Err(e) = run(cmd, &settings).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
