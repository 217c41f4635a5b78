use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use anyhow::bail;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uttt::Player;

use crate::{Agent, HumanAgent, PlayerConfig, ProcessAgent, RandomAgent};

type AgentFactory = Box<dyn Fn(&mut StdRng) -> anyhow::Result<Box<dyn Agent>>>;

/// Maps agent names to constructors.
///
/// All agents are registered up front, either built in or from a
/// [`PlayerConfig`].
#[derive(Default)]
pub struct AgentRegistry {
    factories: BTreeMap<String, AgentFactory>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `human` and `random` agents.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("human", |_| Ok(Box::new(HumanAgent::stdio())));
        registry.register("random", |rng| {
            Ok(Box::new(RandomAgent::new(StdRng::seed_from_u64(rng.gen()))))
        });
        registry
    }

    /// Registers an agent, replacing any earlier agent of the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&mut StdRng) -> anyhow::Result<Box<dyn Agent>> + 'static,
    ) {
        let name = name.into();
        debug!(agent = %name, "Registered agent");
        self.factories.insert(name, Box::new(factory));
    }

    /// Registers a bot that runs in its own process under its nick.
    pub fn register_process(&mut self, config: PlayerConfig) {
        let nick = config.nick.clone();
        self.register(nick, move |_| {
            Ok(Box::new(ProcessAgent::from_config(&config)?))
        });
    }

    /// The registered names, in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Creates a fresh instance of the named agent.
    pub fn create(&self, name: &str, rng: &mut StdRng) -> anyhow::Result<Box<dyn Agent>> {
        match self.factories.get(name) {
            Some(factory) => factory(rng),
            None => bail!(
                "Unknown agent '{}', registered agents are: {}",
                name,
                self.names().join(", ")
            ),
        }
    }

    /// Asks on the console who will play `player` and returns the chosen name.
    pub fn choose_interactively(
        &self,
        player: Player,
        mut input: impl BufRead,
        mut output: impl Write,
    ) -> anyhow::Result<String> {
        let names = self.names();
        let mut buf = String::new();
        loop {
            writeln!(output, "Who will play {}?", player)?;
            for (i, name) in names.iter().enumerate() {
                writeln!(output, "{}.) {}", i + 1, name)?;
            }
            write!(output, "Choice: ")?;
            output.flush()?;

            buf.clear();
            if input.read_line(&mut buf)? == 0 {
                bail!("Console input was closed");
            }
            match buf.trim().parse::<usize>() {
                Ok(choice) if (1..=names.len()).contains(&choice) => {
                    return Ok(String::from(names[choice - 1]));
                }
                _ => writeln!(output, "Invalid choice. Please try again.")?,
            }
        }
    }
}
