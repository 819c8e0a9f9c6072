//! Manifests CLI - resolve explorer URLs from the terminal
//!
//! Every command runs the real explorer on a single-threaded event loop with
//! an in-memory address bar and prints the resulting snapshot:
//!   manifests resolve /k8s-1.28/pod.spec    → snapshot with the resolved view
//!   manifests complete k8s-1.28 pod.        → snapshot with suggestions
//!   manifests versions                      → {"default": ..., "choices": [...]}
//!
//! Configuration (flags win over environment, environment over `.env`):
//!   --api <url>        MANIFESTS_API_URL
//!   --catalog <file>   MANIFESTS_CATALOG
//!   --fixture <file>   offline lookups from a JSON fixture
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, bail, Context};
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use manifests::engine::completion_query;
use manifests::logging::init_logging;
use manifests::{
    Explorer, ExplorerConfig, HttpBackend, MemoryBackend, MemoryHistory, NavigationIntent, SchemaBackend,
    SchemaCatalog, Snapshot, TokioPlatform,
};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Upper bound for one command, lookups included
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);
    init_logging();

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("manifests {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("resolve") => cmd_resolve(&opts),
        Some("complete") => cmd_complete(&opts),
        Some("versions") => cmd_versions(&opts),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    positional: Vec<String>,
    api: Option<String>,
    catalog: Option<String>,
    fixture: Option<String>,
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        // Load .env file if present
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let value = value.trim().trim_matches('"');
                    if !value.is_empty() && env::var(key.trim()).is_err() {
                        env::set_var(key.trim(), value);
                    }
                }
            }
        }

        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--api" | "-a" => {
                    if i + 1 < args.len() {
                        opts.api = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--catalog" | "-c" => {
                    if i + 1 < args.len() {
                        opts.catalog = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--fixture" | "-f" => {
                    if i + 1 < args.len() {
                        opts.fixture = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        // First positional is command
        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        opts.positional = positional;
        opts
    }

    fn config(&self) -> anyhow::Result<ExplorerConfig> {
        let mut config = ExplorerConfig::from_env()?;
        if let Some(api) = &self.api {
            config = config.with_api_url(api.clone());
        }
        if let Some(path) = &self.catalog {
            let contents = std::fs::read_to_string(path).with_context(|| format!("reading catalog {}", path))?;
            config = config.with_catalog(SchemaCatalog::from_json(&contents)?);
        }
        Ok(config)
    }

    fn backend(&self, config: &ExplorerConfig) -> anyhow::Result<Rc<dyn SchemaBackend>> {
        Ok(match &self.fixture {
            Some(path) => {
                debug!(fixture = %path, "offline lookups");
                Rc::new(MemoryBackend::from_file(path)?)
            }
            None => Rc::new(HttpBackend::new(&config.api_url)?),
        })
    }
}

fn print_usage() {
    println!(
        r#"manifests - Schema reference explorer

USAGE:
    manifests <command> [args] [options]

COMMANDS:
    resolve <url-path>          Resolve an explorer URL, e.g. /k8s-1.28/pod.spec
    complete <version> <text>   Autocomplete suggestions for in-progress text
    versions                    List schema versions

OPTIONS:
    --api, -a <url>             Lookup service (env: MANIFESTS_API_URL, default http://localhost:8000/)
    --catalog, -c <file>        Schema version catalog JSON (env: MANIFESTS_CATALOG)
    --fixture, -f <file>        Answer lookups from a JSON fixture instead of the service

OUTPUT OPTIONS:
    --json                      Raw JSON output
    --pretty                    Pretty-print JSON
    --version, -V               Print version

ENVIRONMENT:
    RUST_LOG                    Log filter (default: info)
    MANIFESTS_LOG_JSON=1        JSON log lines on stderr
    MANIFESTS_DEBOUNCE_MS       Autocomplete quiet period (default: 1000)
"#
    );
}

// =============================================================================
// Commands
// =============================================================================

/// Run `task` on a current-thread runtime inside a `LocalSet`
fn run_local<F>(task: F) -> anyhow::Result<Value>
where
    F: std::future::Future<Output = anyhow::Result<Value>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, task)
}

/// Wait for the first snapshot satisfying `done`
async fn settle(
    mut changes: UnboundedReceiver<Snapshot>,
    mut done: impl FnMut(&Snapshot) -> bool,
) -> anyhow::Result<Snapshot> {
    let wait = async {
        while let Some(snapshot) = changes.next().await {
            if done(&snapshot) {
                return Ok(snapshot);
            }
        }
        bail!("explorer closed before settling")
    };
    tokio::time::timeout(SETTLE_TIMEOUT, wait).await.context("timed out waiting for lookups")?
}

fn cmd_resolve(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let url = opts.positional.first().cloned().unwrap_or_else(|| "/".to_string());
    let config = opts.config()?;
    let backend = opts.backend(&config)?;

    run_local(async move {
        let history = Rc::new(MemoryHistory::new(url));
        let explorer = Explorer::new(&config, backend, history, Rc::new(TokioPlatform));
        let changes = explorer.subscribe();
        explorer.initialize_from_browser_location();

        let snapshot = settle(changes, |s| !s.loading && s.view.is_some()).await?;
        Ok(serde_json::to_value(snapshot)?)
    })
}

fn cmd_complete(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let (version, text) = match opts.positional.as_slice() {
        [version, text, ..] => (version.clone(), text.clone()),
        _ => bail!("Usage: manifests complete <version> <text>"),
    };
    // Nothing is typed interactively, so there is nothing to wait out.
    let config = opts.config()?.with_quiet_period(Duration::ZERO);
    let version = config
        .catalog
        .lookup(&version)
        .cloned()
        .ok_or_else(|| anyhow!("unknown schema version: {}", version))?;
    let backend = opts.backend(&config)?;

    run_local(async move {
        let history = Rc::new(MemoryHistory::default());
        let explorer = Explorer::new(&config, backend, history, Rc::new(TokioPlatform));
        explorer.set_schema_version(version, NavigationIntent::Sync);
        if completion_query(&text).is_none() {
            return Ok(serde_json::to_value(explorer.snapshot())?);
        }

        let changes = explorer.subscribe();
        explorer.set_draft(&text);
        let mut seen_lookup = false;
        let snapshot = settle(changes, |s| {
            seen_lookup |= s.suggestions_loading;
            seen_lookup && !s.suggestions_loading
        })
        .await?;
        Ok(serde_json::to_value(snapshot)?)
    })
}

fn cmd_versions(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let config = opts.config()?;
    let catalog = &config.catalog;
    Ok(json!({
        "default": catalog.default_version(),
        "choices": catalog.choices(),
    }))
}
