mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::DatasetLoader;
use error::Result;
use logic::{QueryResponder, Recommender};
use models::{Conditions, Dataset};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{AdvisorScreen, AskScreen, ChartsScreen};

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let config_override = cli.config.as_deref();
    let dataset_override = cli.dataset.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            let target = Config::init_path(config_override)?;
            if !Config::confirm_overwrite(&target)? {
                println!("Keeping existing config at {}", target.display());
                return Ok(());
            }
            Config::setup_interactive(Some(&target))?;
            Ok(())
        }
        Some(Commands::Check) => run_check(config_override, dataset_override),
        Some(Commands::Recommend {
            temperature,
            humidity,
            ph,
            rainfall,
            json,
        }) => {
            let config = load_config_or_exit(config_override);
            let (_, recommender) = load_model_or_exit(&config, dataset_override);
            let conditions = Conditions::new(temperature, humidity, ph, rainfall);
            if !conditions.features().iter().all(|v| v.is_finite()) {
                return Err(error::GrowWiseError::InvalidData(
                    "conditions must be finite numbers".into(),
                ));
            }
            let rec = recommender.recommend(&conditions);
            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else {
                println!("{}", rec);
            }
            Ok(())
        }
        Some(Commands::Ask { text }) => {
            let config = load_config_or_exit(config_override);
            let responder = QueryResponder::with_extra_rules(config.chat.rules);
            println!("{}", responder.respond(&text.join(" ")));
            Ok(())
        }
        None => run_tui(config_override, dataset_override),
    }
}

fn load_config_or_exit(config_override: Option<&Path>) -> Config {
    match Config::load(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `growwise init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    }
}

/// Load the training CSV and fit the model. Either failing is fatal.
fn load_model_or_exit(config: &Config, dataset_override: Option<&Path>) -> (Dataset, Recommender) {
    let path = config.dataset_path(dataset_override);
    let dataset = match DatasetLoader::from_path(&path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load dataset {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let recommender = match Recommender::train(&dataset, &config.model.tree_params()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to train model: {}", e);
            std::process::exit(1);
        }
    };

    for crop in recommender.uncovered_crops() {
        tracing::warn!("No fertilizer entry for crop '{}', default advice will be shown", crop);
    }

    (dataset, recommender)
}

fn run_check(config_override: Option<&Path>, dataset_override: Option<&Path>) -> Result<()> {
    let source = if Config::exists(config_override) {
        "config file"
    } else {
        "built-in defaults"
    };
    let config = load_config_or_exit(config_override);
    println!("Config:   {}", source);

    let path = config.dataset_path(dataset_override);
    println!("Dataset:  {}", path.display());

    let (_, recommender) = load_model_or_exit(&config, dataset_override);
    let summary = recommender.summary();
    println!("Examples: {}", summary.n_examples);
    println!("Crops:    {}", summary.crops.join(", "));
    println!("Tree:     depth {}, {} leaves", summary.depth, summary.n_leaves);
    println!("Training accuracy: {:.1}%", summary.training_accuracy * 100.0);

    let uncovered = recommender.uncovered_crops();
    if !uncovered.is_empty() {
        println!(
            "Warning: no fertilizer entry for {} (default advice is used)",
            uncovered.join(", ")
        );
    }

    let unused = recommender.unused_table_entries();
    if !unused.is_empty() {
        println!("Fertilizer entries with no training data: {}", unused.join(", "));
    }

    let rules = QueryResponder::with_extra_rules(config.chat.rules);
    println!("Chat rules: {}", rules.list_rules().join(", "));
    Ok(())
}

fn run_tui(config_override: Option<&Path>, dataset_override: Option<&Path>) -> Result<()> {
    let config = load_config_or_exit(config_override);
    let (dataset, recommender) = load_model_or_exit(&config, dataset_override);
    let responder = QueryResponder::with_extra_rules(config.chat.rules.clone());

    let mut app = App::new(&recommender, &responder, &dataset);
    app.set_status(&format!(
        "Model trained on {} examples ({} crops)",
        dataset.len(),
        recommender.crops().len()
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Advisor => {
                    let state = &app.advisor_state;
                    let screen = AdvisorScreen::new(&state.conditions)
                        .with_focus(state.focused_field)
                        .with_recommendation(state.last_recommendation.as_ref(), state.is_stale())
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Ask => {
                    let screen = AskScreen::new(&app.ask_state.input, &app.ask_state.history);
                    f.render_widget(screen, area);
                }
                Screen::Charts => {
                    let screen = ChartsScreen::new(&app.chart_data);
                    f.render_widget(screen, area);
                }
            }
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global key handling
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Char('q') if !app.is_typing() => {
                        app.quit();
                    }
                    KeyCode::Esc => {
                        app.switch_screen(Screen::Advisor);
                    }
                    KeyCode::Char(c) if !app.is_typing() => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => {
                        handle_screen_input(app, key.code);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Advisor => handle_advisor_input(app, code),
        Screen::Ask => handle_ask_input(app, code),
        Screen::Charts => {}
    }
}

fn handle_advisor_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.advisor_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.advisor_state.next_field(),
        KeyCode::Left => app.advisor_state.adjust(-1),
        KeyCode::Right => app.advisor_state.adjust(1),
        KeyCode::PageDown => app.advisor_state.adjust(-10),
        KeyCode::PageUp => app.advisor_state.adjust(10),
        KeyCode::Enter => app.predict(),
        KeyCode::Char('r') => {
            app.advisor_state.reset();
            app.set_status("Form reset to defaults");
        }
        _ => {}
    }
}

fn handle_ask_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit_query(),
        KeyCode::Backspace => {
            app.ask_state.input.pop();
        }
        KeyCode::Char(c) => {
            app.ask_state.input.push(c);
        }
        _ => {}
    }
}
