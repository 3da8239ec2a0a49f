//! pireader - terminal reader for prescribing-information labels

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pireader::config::{CONTENT_BASE_ENV, ORIGIN_ENV};
use pireader::nav::strip_hash;
use pireader::{Action, HttpProvider, Location, MemoryLocation, ProviderConfig, Reader};

#[derive(Parser)]
#[command(name = "pireader")]
#[command(version, about = "Read a prescribing-information label", long_about = None)]
#[command(after_help = "EXAMPLES:
    pireader --origin http://localhost:8080 outline
    pireader --product navsunli --hash dosage show
    pireader --base https://cdn.example/content session")]
struct Cli {
    /// Content service base URL
    #[arg(long, env = CONTENT_BASE_ENV)]
    base: Option<String>,

    /// Product id (overrides --query)
    #[arg(long)]
    product: Option<String>,

    /// Page query string, e.g. "?productId=navsunli"
    #[arg(long)]
    query: Option<String>,

    /// Origin that relative locations are resolved against
    #[arg(long, env = ORIGIN_ENV)]
    origin: Option<String>,

    /// Initial location hash
    #[arg(long, default_value = "")]
    hash: String,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the numbered section outline
    Outline,
    /// Print the full page as HTML
    Render,
    /// Print the reading pane as plain text
    Show,
    /// Read commands from stdin (type "help")
    Session,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn config(cli: &Cli) -> pireader::Result<ProviderConfig> {
    let mut config = ProviderConfig::new();
    if let Some(base) = &cli.base {
        config = config.with_base_url(base);
    }
    if let Some(query) = &cli.query {
        config = config.with_query(query);
    }
    if let Some(product) = &cli.product {
        config = config.with_product_id(product);
    }
    if let Some(origin) = cli.origin.as_deref().map(str::trim)
        && !origin.is_empty()
    {
        config = config.with_origin(url::Url::parse(origin)?);
    }
    Ok(config)
}

fn run(cli: Cli) -> pireader::Result<ExitCode> {
    let provider = HttpProvider::new(config(&cli)?)?;
    let mut reader = Reader::start(provider, MemoryLocation::new(&cli.hash));

    match cli.command {
        Command::Outline => {
            if let Some(err) = reader.load_error() {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }
            print!("{}", reader.outline());
        }
        Command::Render => println!("{}", reader.render_page()),
        Command::Show => println!("{}", reader.render_text()),
        Command::Session => session(&mut reader)?,
    }
    Ok(ExitCode::SUCCESS)
}

const SESSION_HELP: &str = "\
go <id>        navigate to a view, section or subsection
hash <id>      simulate a hash change
toggle <id>    click a section header
sub <id>       click a subsection
content        open the content nav
menu | close   open or close the content drawer
search <text>  set the glossary search
more           show more / show less
state          print navigation state
show           print the reading pane
quit";

fn session(reader: &mut Reader<HttpProvider, MemoryLocation>) -> pireader::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", reader.render_text());

    loop {
        write!(stdout, "#{}> ", reader.location().hash())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim().to_string();

        let action = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{SESSION_HELP}");
                continue;
            }
            "state" => {
                print_state(reader);
                continue;
            }
            "show" => {
                println!("{}", reader.render_text());
                continue;
            }
            "go" => Action::Navigate(arg),
            "hash" => {
                reader.location_mut().replace_hash(strip_hash(&arg));
                Action::HashChanged(arg)
            }
            "toggle" => Action::ToggleSection(arg),
            "sub" => Action::SelectSubsection(arg),
            "content" => Action::OpenContent,
            "menu" => Action::OpenDrawer,
            "close" => Action::CloseDrawer,
            "search" => Action::SetGlossaryQuery(arg),
            "more" => Action::ToggleBody,
            other => {
                println!("unknown command '{other}' (try \"help\")");
                continue;
            }
        };

        let redraw = matches!(action, Action::ToggleBody | Action::SetGlossaryQuery(_));
        if reader.dispatch(action) || redraw {
            println!("{}", reader.render_text());
        } else {
            print_state(reader);
        }
    }
    Ok(())
}

fn print_state(reader: &Reader<HttpProvider, MemoryLocation>) {
    let state = reader.state();
    let expanded: Vec<&str> = state.expanded().iter().map(String::as_str).collect();
    println!(
        "active={} expanded=[{}] content_nav={} drawer={}",
        state.active(),
        expanded.join(", "),
        state.show_content_nav(),
        if state.drawer_open() { "open" } else { "closed" }
    );
}
