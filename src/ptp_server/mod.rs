mod options;

use std::io::BufRead;

use itertools::Itertools;
pub use options::PTPServerOptions;

use crate::prelude::*;

/// Serves the Pylos engine over a line-based protocol: one command per line, and every response ends
/// with `ok` (errors come first as `err` and a message).
pub struct PTPServer {
    agent: Box<dyn Agent>,
    evaluator: Evaluator,
    game: Option<Simulator>,
    history: Vec<(Move, GameState, Color)>,
}

impl PTPServer {
    /// Produces a new PTP server with the given engine configuration.
    pub fn new(options: &PTPServerOptions) -> PTPServer {
        let config = options.agent_config();
        PTPServer {
            agent: config.get_agent(),
            evaluator: Evaluator::new(config.weights),
            game: None,
            history: vec![],
        }
    }

    /// Runs the engine until `quit` or the end of input.
    pub fn run(&mut self) -> Result<()> {
        log::info!("{} v{} ready", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let cmdstr = line?;
            let args: Vec<&str> = cmdstr.split_whitespace().collect();
            let cmd = *args.first().unwrap_or(&"");

            if cmd == "quit" {
                self.ok();
                break;
            }
            self.apply(cmd, args.get(1..).unwrap_or(&[]));
        }

        log::info!("shutting down");
        Ok(())
    }

    /// Runs a command and prints its response.
    fn apply(&mut self, cmd: &str, args: &[&str]) {
        match self.execute(cmd, args) {
            Ok(response) => {
                log::debug!("Command completed successfully: {cmd} {}", args.join(" "));
                if !response.is_empty() {
                    println!("{response}");
                }
                self.ok();
            },
            Err(err) => {
                log::warn!("encountered recoverable error:\n{err:#}");
                self.err(&err);
            },
        }
    }

    /// Runs a command, returning the response body.
    fn execute(&mut self, cmd: &str, args: &[&str]) -> Result<String> {
        match cmd {
            | "" => Ok(String::new()),
            | "bestmove" => self.best_move(args),
            | "board" => self.board(args),
            | "info" => self.info(),
            | "newgame" => self.new_game(args),
            | "play" => self.play_move(args),
            | "score" => self.score(args),
            | "undo" => self.undo_move(args),
            | "validmoves" => self.valid_moves(args),
            | _ => Err(anyhow!("unrecognized command {cmd}")),
        }
    }

    fn best_move(&mut self, args: &[&str]) -> Result<String> {
        let sim = self.get()?.clone();

        if args.len() >= 2 {
            match args[0] {
                "depth" => {
                    let depth = args[1].parse::<u8>()?;
                    if depth == 0 {
                        bail!("search depth must be positive");
                    }
                    self.agent.set_max_depth(depth);
                },
                _       => bail!("unrecognized search option {}", args[0]),
            };
        }
        let mv = self.agent.choose_move(sim.state(), sim.board(), sim.color())?;
        Ok(mv.notate())
    }

    fn board(&mut self, _args: &[&str]) -> Result<String> {
        Ok(self.get()?.board().pretty())
    }

    /// Starts a new game, either from a sequence of moves or from a layout with a colour to move.
    fn new_game(&mut self, args: &[&str]) -> Result<String> {
        let (sim, history) = match args {
            ["layout", layout, color] => {
                let layout = layout.parse::<Layout>()?;
                let Some(color) = Color::parse(color)? else {
                    bail!("no colour to move given");
                };
                (Simulator::at_turn(color, Board::with_layout(&layout)?), vec![])
            },
            ["layout", ..] => bail!("usage: newgame layout <layout> <light|dark>"),
            _ => {
                let GameString { moves } = args.join(" ").parse::<GameString>()?;
                let mut sim = Simulator::new(GameState::Move, Color::Light, Board::new());
                let mut history = vec![];
                for movestr in moves {
                    let mv = movestr.resolve(sim.state(), sim.color(), sim.board())?;
                    history.push((mv, sim.state(), sim.color()));
                    sim.apply(&mv);
                }
                (sim, history)
            }
        };

        // a game that failed to set up leaves the previous one in place
        self.game = Some(sim);
        self.history = history;
        self.status()
    }

    fn play_move(&mut self, args: &[&str]) -> Result<String> {
        let sim = self.ensure_started()?;
        let Some(movestr) = args.first() else {
            bail!("no move provided");
        };

        let mv = movestr.parse::<MoveString>()?.resolve(sim.state(), sim.color(), sim.board())?;
        let prior = (sim.state(), sim.color());
        sim.apply(&mv);
        self.history.push((mv, prior.0, prior.1));
        self.status()
    }

    fn score(&mut self, _args: &[&str]) -> Result<String> {
        let sim = self.get()?;
        Ok(self.evaluator.evaluate(sim.board(), sim.color()).to_string())
    }

    fn undo_move(&mut self, _args: &[&str]) -> Result<String> {
        self.get()?;
        let Some((mv, state, color)) = self.history.pop() else {
            bail!("no move to undo");
        };
        self.ensure_started()?.undo(&mv, state, color);
        self.status()
    }

    fn valid_moves(&mut self, _args: &[&str]) -> Result<String> {
        let sim = self.get()?;
        let moves = legal_moves(sim.state(), sim.color(), sim.board());
        Ok(format!("{}\n{}", moves.len(), moves.iter().map(|mv| mv.notate()).join("; ")))
    }

    // accessors

    fn ensure_started(&mut self) -> Result<&mut Simulator> {
        self.game.as_mut().ok_or(anyhow!("no game in progress"))
    }

    /// Retrieves the game in a shared context.
    fn get(&self) -> Result<&Simulator> {
        self.game.as_ref().ok_or(anyhow!("no game in progress"))
    }

    /// The sub-turn, the colour to move (or the outcome) and the layout.
    fn status(&self) -> Result<String> {
        let sim = self.get()?;
        let turn = match (sim.state(), sim.winner()) {
            (GameState::Completed, Some(winner)) => format!("{winner} wins"),
            (GameState::Draw, _)                 => "draw".into(),
            (state, _)                           => format!("{state} {}", sim.color()),
        };
        Ok(format!("{turn} {}", sim.board().notate()))
    }

    // basic printers

    /// The server's ID.
    fn info(&self) -> Result<String> {
        Ok(format!("id {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
    }

    /// Prints an error to the PTP stream.
    fn err(&self, err: &Error) {
        println!("err\n{err}");
        self.ok();
    }

    /// Prints the ok footer to the PTP stream.
    fn ok(&self) {
        println!("ok");
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn server() -> PTPServer {
        PTPServer::new(&PTPServerOptions::parse_from(["pylos", "--depth", "2", "--cache-entries", "4096"]))
    }

    #[test]
    fn commands_need_a_game() {
        let mut s = server();
        assert!(s.execute("info", &[]).unwrap().starts_with("id "));
        assert!(s.execute("play", &["+0,0,0"]).is_err());
        assert!(s.execute("bestmove", &[]).is_err());
        assert!(s.execute("frobnicate", &[]).is_err());
    }

    #[test]
    fn play_and_undo() {
        let mut s = server();
        let empty = ".".repeat(NUM_LOCATIONS);
        assert_eq!(s.execute("newgame", &[]).unwrap(), format!("move light {empty}"));
        assert_eq!(s.execute("validmoves", &[]).unwrap().lines().next(), Some("16"));

        let status = s.execute("play", &["+1,1,0"]).unwrap();
        assert!(status.starts_with("move dark .....L"));
        assert!(s.execute("play", &["+1,1,0"]).is_err(), "occupied");
        assert_eq!(s.execute("score", &[]).unwrap(), "10");

        assert_eq!(s.execute("undo", &[]).unwrap(), format!("move light {empty}"));
        assert!(s.execute("undo", &[]).is_err());
    }

    #[test]
    fn gamestrings_replay_removals() {
        let mut s = server();
        let game = "+0,0,0; +3,3,0; +1,0,0; +3,2,0; +0,1,0; +2,3,0; +1,1,0";
        let status = s.execute("newgame", &game.split(' ').collect::<Vec<_>>()).unwrap();
        assert!(status.starts_with("remove_first light"));

        s.execute("play", &["-0,0,0"]).unwrap();
        let status = s.execute("play", &["pass"]).unwrap();
        assert!(status.starts_with("move dark"));

        s.execute("undo", &[]).unwrap();
        let moves = s.execute("validmoves", &[]).unwrap();
        assert!(moves.ends_with("pass; -1,0,0; -0,1,0; -1,1,0"), "{moves}");
    }

    #[test]
    fn layouts_and_searches() {
        let mut s = server();
        s.execute("newgame", &["layout", "LL..L..........D", "light"]).unwrap();
        assert_eq!(s.execute("bestmove", &["depth", "3"]).unwrap(), "+1,1,0");
        assert!(s.execute("newgame", &["layout", "LL..L"]).is_err());
        assert!(s.execute("bestmove", &["depth", "0"]).is_err());
        assert!(s.execute("board", &[]).unwrap().contains("reserves: light 12, dark 14"));

        s.execute("newgame", &["layout", "LDLDDLDLLDLDDLDL/LDLDLDLDL/DDDL", "light"]).unwrap();
        let status = s.execute("play", &["+0,0,3"]).unwrap();
        assert!(status.starts_with("light wins"));
        assert!(s.execute("bestmove", &[]).is_err());
    }

    #[test]
    fn decided_layouts_refuse_to_search() {
        let mut s = server();
        let status = s.execute("newgame", &["layout", "LDLDDLDLLDLDDLDL/LDLDLDLDL/DDDL/L", "dark"]).unwrap();
        assert!(status.starts_with("light wins"), "{status}");
        assert!(s.execute("bestmove", &[]).is_err());
        assert_eq!(s.execute("validmoves", &[]).unwrap(), "0\n");

        let status = s.execute("newgame", &["layout", "LDLDDLDLLDLDDLDL/LDLDLDLDL/DDD", "dark"]).unwrap();
        assert!(status.starts_with("light wins"), "{status}");
        assert!(s.execute("bestmove", &[]).is_err());
        assert!(s.execute("play", &["+1,1,2"]).is_err());
    }
}
