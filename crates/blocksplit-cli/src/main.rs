mod app;

use anyhow::{Context, Result};
use app::App;
use blocksplit_config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

enum Mode {
    Preview(PathBuf),
    Dump(PathBuf),
}

fn parse_args(args: &[String]) -> Option<Mode> {
    match args {
        [_, path] if path != "--dump" => Some(Mode::Preview(PathBuf::from(path))),
        [_, flag, path] if flag == "--dump" => Some(Mode::Dump(PathBuf::from(path))),
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(mode) = parse_args(&args) else {
        let program = args.first().map_or("blocksplit", String::as_str);
        eprintln!("Usage: {program} [--dump] <file>");
        process::exit(1);
    };

    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());
    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let segmenter = app::segmenter_from_config(&config.heuristics);

    match mode {
        Mode::Dump(path) => {
            let text = read_input(&path)?;
            print!("{}", app::dump(&segmenter, &text)?);
            Ok(())
        }
        Mode::Preview(path) => {
            let text = read_input(&path)?;
            let mut app = App::new(text, segmenter, config.preview.chunk_size);
            run_terminal(&mut app)
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn run_terminal(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_block(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_block(),
                KeyCode::Char('n') | KeyCode::Char(' ') => app.step(),
                KeyCode::Char('a') => app.reveal_all(),
                KeyCode::Char('r') => app.reset(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(rows[0]);

    // Block list panel
    let block_items: Vec<ListItem> = app
        .segments
        .iter()
        .map(|segment| {
            let style = if segment.block.is_partial() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(App::block_label(segment), style)))
        })
        .collect();

    let title = format!("Blocks ({}/{} bytes)", app.revealed(), app.total());
    let blocks_list = List::new(block_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(blocks_list, chunks[0], &mut app.list_state);

    // Content panel
    let content_text: Vec<Line> = app.content_lines().into_iter().map(Line::from).collect();

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Content"))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("n/Space: Stream chunk | a: Reveal all | r: Reset"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    f.render_widget(help, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn preview_takes_a_single_path() {
        assert!(matches!(
            parse_args(&args(&["blocksplit", "reply.md"])),
            Some(Mode::Preview(p)) if p == PathBuf::from("reply.md")
        ));
    }

    #[test]
    fn dump_flag_precedes_path() {
        assert!(matches!(
            parse_args(&args(&["blocksplit", "--dump", "reply.md"])),
            Some(Mode::Dump(p)) if p == PathBuf::from("reply.md")
        ));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse_args(&args(&["blocksplit"])).is_none());
        assert!(parse_args(&args(&["blocksplit", "--dump"])).is_none());
        assert!(parse_args(&args(&["blocksplit", "a", "b"])).is_none());
    }
}
