use clap::{Parser, Subcommand};
use hashnav::app::{App, UserEvent};
use hashnav::config::{self, AppConfig};
use hashnav::location::Location;
use hashnav::logging::{LogConfig, LogFormat, init_logging};
use hashnav::output;
use hashnav::script::{self, Step};
use hashnav::source::HttpPostSource;
use hashnav::store::FileStore;
use hashnav::widgets::{CommentBox, EngagementCounter, FramePlayback, Polarity};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("HASHNAV_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}@{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "hashnav")]
#[command(about = "Hash-routed post browser with comment and like/dislike widgets")]
#[command(long_about = "\
Hash-routed post browser with comment and like/dislike widgets

Renders the app headlessly. Pages are selected by URL fragment:

  #/          Home
  #/about     About
  #/posts     Posts (paginated list, click through to a post and its comments)
  #/contact   Contact

Anything else renders 'Page not found'. Posts come from the configured API;
comments and like/dislike counts persist in a JSON store file.

Run 'hashnav gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Store file (overrides storage.path from config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page for a fragment once all fetches have settled
    Render {
        /// URL fragment, e.g. "#/posts"
        fragment: String,
        /// Write HTML to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Listing page to show (posts view only)
        #[arg(long)]
        page: Option<usize>,
    },
    /// Replay an event script, printing a status summary after each step
    Run {
        /// Script file (reads stdin when omitted)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Write the final page HTML to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Submit a comment to the store
    Comment {
        text: String,
    },
    /// Increment the like counter
    Like,
    /// Increment the dislike counter
    Dislike,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(
        &LogConfig::from_verbosity(cli.verbose)
            .with_format(cli.log_format)
            .with_ansi(std::io::stderr().is_terminal()),
    );

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let app_config = config::load_config(&cli.config_dir)?;
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| app_config.storage.path.clone());

    match cli.command {
        Command::Render {
            fragment,
            output,
            page,
        } => {
            let mut app = start_app(app_config, &store_path, &fragment)?;
            app.settle();
            if let Some(page) = page {
                app.dispatch(UserEvent::GoToPage(page));
            }
            write_html(&app.render().into_string(), output.as_deref())?;
        }
        Command::Run { script, output } => {
            let text = match &script {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let steps = script::parse(&text)?;

            let mut app = start_app(app_config, &store_path, "#/")?;
            app.settle();
            output::print_status(&app);
            for step in steps {
                match step {
                    Step::Navigate(fragment) => app.navigate(&fragment),
                    Step::Events(events) => {
                        for event in events {
                            app.dispatch(event);
                        }
                    }
                }
                app.settle();
                output::print_status(&app);
            }
            app.shutdown();
            if let Some(path) = output {
                write_html(&app.render().into_string(), Some(&path))?;
            }
        }
        Command::Comment { text } => {
            let mut store = open_store(&store_path);
            let mut comments = CommentBox::load(&store);
            comments.set_draft(text);
            if !comments.submit(&mut store) {
                println!("Empty comment ignored");
            }
            output::print_comments(comments.comments());
        }
        Command::Like => increment(Polarity::Like, &store_path),
        Command::Dislike => increment(Polarity::Dislike, &store_path),
        Command::GenConfig => {}
    }

    Ok(())
}

fn start_app(
    config: AppConfig,
    store_path: &Path,
    fragment: &str,
) -> Result<App<FileStore, HttpPostSource>, Box<dyn std::error::Error>> {
    let source = HttpPostSource::new(&config.api.base_url)?;
    let store = open_store(store_path);
    Ok(App::start(config, store, source, Location::new(fragment)))
}

fn open_store(path: &Path) -> FileStore {
    let store = FileStore::open(path);
    tracing::debug!(path = %store.path().display(), "store opened");
    store
}

fn increment(polarity: Polarity, store_path: &Path) {
    let mut store = open_store(store_path);
    let mut counter = EngagementCounter::load(polarity, &store, FramePlayback::default());
    let count = counter.increment(&mut store);
    println!("{}: {}", polarity.label(), count);
}

fn write_html(html: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, html)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}
