use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use tracing::trace;
use uttt::{Okay, Player, Request, SuperBoard};

use crate::Agent;

/// Describes a bot that runs as its own process, loaded from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// The name the bot is registered under.
    pub nick: String,
    /// The executable to start.
    pub cmd: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config '{}'", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        Ok(config)
    }
}

/// An agent in a child process, talking JSON lines over its stdin and stdout.
pub struct ProcessAgent {
    name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl ProcessAgent {
    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let mut child = Command::new(&config.cmd)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start '{}' for {}", config.cmd, config.nick))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Could not access stdin of {}", config.nick))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Could not access stdout of {}", config.nick))?;

        Ok(Self {
            name: config.nick.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    fn send(&mut self, req: &Request) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", agent = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    fn perform_request<T: serde::de::DeserializeOwned>(
        &mut self,
        req: &Request,
    ) -> anyhow::Result<T> {
        self.send(req)?;
        self.buf.clear();
        if self.stdout.read_line(&mut self.buf)? == 0 {
            bail!("{} exited without answering", self.name);
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", agent = &self.name, response = %serialized_response);
        let response = serde_json::from_str::<T>(serialized_response).with_context(|| {
            format!("{} sent an invalid response: {}", self.name, serialized_response)
        })?;
        self.buf.clear();
        Ok(response)
    }
}

impl Agent for ProcessAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, player: Player) -> anyhow::Result<()> {
        let _: Okay = self.perform_request(&Request::NewGame { player })?;
        Ok(())
    }

    fn propose(&mut self, board: &SuperBoard, player: Player) -> anyhow::Result<u8> {
        self.perform_request(&Request::PlayTurn {
            player,
            board: board.clone(),
            legal_moves: board.legal_moves(),
        })
    }

    fn bye(&mut self) -> anyhow::Result<()> {
        self.send(&Request::Bye)?;
        self.child.wait()?;
        Ok(())
    }
}
