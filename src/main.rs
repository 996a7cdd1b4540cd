mod view;

use anyhow::Context;
use session::Controller;
use std::{env, io::BufRead, thread};
use store::{Gateway, Repository};
use tokio::{runtime::Runtime, sync::mpsc};
use view::{Flow, View};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let path = env::var("QUIZDECK_STORE").unwrap_or_else(|_| String::from("quizdeck.json"));
    let repository = Repository::from(Gateway::new(path));
    log::info!("loaded {} quizzes", repository.quizzes().len());

    let runtime = Runtime::new().context("cannot initialize the runtime")?;
    runtime.block_on(run(repository))
}

async fn run(repository: Repository) -> anyhow::Result<()> {
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut controller = Controller::new(repository, timer_tx);

    // Blocking stdin reader on its own thread; lines flow into the select
    // loop below so user input and countdown signals stay serialized.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut view = View::new(&controller);
    loop {
        tokio::select! {
            maybe = input_rx.recv() => {
                let Some(line) = maybe else { break };
                if matches!(view.on_input(&mut controller, line.trim()), Flow::Quit) {
                    break;
                }
            }
            Some(event) = timer_rx.recv() => view.on_timer(&mut controller, event),
        }
    }

    Ok(())
}
