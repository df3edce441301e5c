//! Math Crossword entry point
//!
//! Native builds run a line-oriented terminal game. The browser build goes through
//! `math_crossword::wasm` instead.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use rand::Rng;
    use thiserror::Error;

    use math_crossword::persistence::{autosave, clear_session, load_session};
    use math_crossword::platform::{FileStorage, MemoryStorage, Storage};
    use math_crossword::puzzle::wrong_equations;
    use math_crossword::render::{render_grid, render_pool, render_status, render_verdict};
    use math_crossword::{Difficulty, Session, Settings};

    /// Fill the grid with number tiles until every equation holds.
    #[derive(Parser, Debug)]
    #[command(about, long_about = None, version)]
    struct Args {
        /// Start a new session at this level
        #[arg(short, long)]
        level: Option<u32>,

        /// Start a new session at this difficulty (saved as the preference)
        #[arg(value_enum, short = 'f', long)]
        difficulty: Option<Difficulty>,

        /// Start a new session from this seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory for the save files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Do not read or write save files
        #[arg(long, default_value_t = false)]
        no_save: bool,

        /// Print the puzzle and exit
        #[arg(short, long, default_value_t = false)]
        print: bool,

        /// Enable debug messages
        #[arg(long, default_value_t = false)]
        debug: bool,
    }

    /// One line of player input
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Command {
        Place { value: u32, row: usize, col: usize },
        Clear { row: usize, col: usize },
        Check,
        New,
        Next,
        Difficulty(Difficulty),
        Show,
        Help,
        Quit,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub(crate) enum CommandError {
        #[error("unknown command `{0}`, type `help`")]
        Unknown(String),
        #[error("usage: {0}")]
        Usage(&'static str),
        #[error("`{0}` is not a number")]
        NotANumber(String),
        #[error("unknown difficulty `{0}` (easy, medium, hard)")]
        UnknownDifficulty(String),
    }

    const HELP: &str = "\
Commands:
  place <value> <row> <col>   move a tile from the pool onto the grid
  clear <row> <col>           move a tile back to the pool
  check                       check the solution
  next                        go to the next level (after a solved check)
  new                         new puzzle at the same level
  difficulty <easy|medium|hard>
  show                        print the grid again
  help
  quit";

    fn number<T: std::str::FromStr>(arg: &str) -> Result<T, CommandError> {
        arg.parse()
            .map_err(|_| CommandError::NotANumber(arg.to_string()))
    }

    /// `Ok(None)` for a blank line
    pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (name.to_lowercase().as_str(), args) {
            ("place" | "p", [value, row, col]) => Command::Place {
                value: number(value)?,
                row: number(row)?,
                col: number(col)?,
            },
            ("place" | "p", _) => return Err(CommandError::Usage("place <value> <row> <col>")),
            ("clear" | "c", [row, col]) => Command::Clear {
                row: number(row)?,
                col: number(col)?,
            },
            ("clear" | "c", _) => return Err(CommandError::Usage("clear <row> <col>")),
            ("check", []) => Command::Check,
            ("new", []) => Command::New,
            ("next", []) => Command::Next,
            ("difficulty" | "d", [name]) => Command::Difficulty(
                Difficulty::from_str(name)
                    .ok_or_else(|| CommandError::UnknownDifficulty(name.to_string()))?,
            ),
            ("difficulty" | "d", _) => {
                return Err(CommandError::Usage("difficulty <easy|medium|hard>"));
            }
            ("show" | "s", []) => Command::Show,
            ("help" | "h" | "?", []) => Command::Help,
            ("quit" | "q" | "exit", []) => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(Some(command))
    }

    struct Game {
        session: Session,
        settings: Settings,
        storage: Box<dyn Storage>,
    }

    impl Game {
        fn show(&self) {
            println!("{}", render_status(&self.session));
            print!("{}", render_grid(&self.session.puzzle));
            println!("{}", render_pool(&self.session.puzzle.pool));
        }

        /// Run one command; false when the player quits
        fn execute(&mut self, command: Command) -> bool {
            match command {
                Command::Place { value, row, col } => {
                    match self.session.place_tile(value, row, col) {
                        Ok(Some(previous)) => println!("{previous} went back to the pool"),
                        Ok(None) => {}
                        Err(e) => println!("{e}"),
                    }
                    autosave(self.storage.as_ref(), &self.session);
                    self.show();
                }
                Command::Clear { row, col } => {
                    if let Err(e) = self.session.clear_tile(row, col) {
                        println!("{e}");
                    }
                    autosave(self.storage.as_ref(), &self.session);
                    self.show();
                }
                Command::Check => {
                    let verdict = self.session.check();
                    println!("{}", render_verdict(&verdict));
                    for eq in wrong_equations(&self.session.puzzle.grid) {
                        println!("  wrong: {:?} equation at ({}, {})", eq.axis, eq.row, eq.col);
                    }
                    if verdict.is_solved() {
                        println!("Type `next` for level {}", self.session.level.saturating_add(1));
                    }
                    autosave(self.storage.as_ref(), &self.session);
                }
                Command::Next => {
                    if !self.session.is_solved() {
                        println!("Solve the puzzle and `check` it first");
                        return true;
                    }
                    self.regenerate(Session::next_level);
                }
                Command::New => {
                    if let Err(e) = clear_session(self.storage.as_ref()) {
                        log::warn!("Could not discard the saved puzzle: {e}");
                    }
                    self.regenerate(Session::new_game);
                }
                Command::Difficulty(difficulty) => {
                    self.settings.difficulty = difficulty;
                    self.settings.save(self.storage.as_ref());
                    self.regenerate(|s| s.set_difficulty(difficulty));
                }
                Command::Show => self.show(),
                Command::Help => println!("{HELP}"),
                Command::Quit => return false,
            }
            true
        }

        fn regenerate(
            &mut self,
            event: impl FnOnce(&mut Session) -> Result<(), math_crossword::puzzle::GenerationError>,
        ) {
            if let Err(e) = event(&mut self.session) {
                println!("{e}; keeping the current puzzle");
            }
            autosave(self.storage.as_ref(), &self.session);
            self.show();
        }
    }

    fn init_logging(debug: bool) {
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
        if debug {
            builder.filter_level(log::LevelFilter::Debug);
        }
        builder.init();
    }

    pub fn run() -> ExitCode {
        let args = Args::parse();
        init_logging(args.debug);

        let storage: Box<dyn Storage> = if args.no_save {
            Box::new(MemoryStorage::new())
        } else {
            let dir = args.data_dir.clone().unwrap_or_else(FileStorage::default_dir);
            Box::new(FileStorage::new(dir))
        };

        let mut settings = Settings::load(storage.as_ref());
        if let Some(difficulty) = args.difficulty {
            settings.difficulty = difficulty;
            settings.save(storage.as_ref());
        }

        let fresh = args.level.is_some() || args.difficulty.is_some() || args.seed.is_some();
        let restored = if fresh {
            None
        } else {
            load_session(storage.as_ref()).unwrap_or_else(|e| {
                log::warn!("Discarding saved session: {e}");
                None
            })
        };

        let session = match restored {
            Some(session) => session,
            None => {
                let seed = args.seed.unwrap_or_else(|| rand::rng().random());
                match Session::new(args.level.unwrap_or(0), settings.difficulty, seed) {
                    Ok(session) => session,
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
        };

        let mut game = Game {
            session,
            settings,
            storage,
        };
        autosave(game.storage.as_ref(), &game.session);
        game.show();
        if args.print {
            return ExitCode::SUCCESS;
        }
        println!("Type `help` for the commands");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            let Some(Ok(line)) = lines.next() else {
                break;
            };
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if !game.execute(command) {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{e}"),
            }
        }
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    terminal::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `math_crossword::wasm::start`
}
