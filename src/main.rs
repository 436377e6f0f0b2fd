//! Command Agent - Entry Point
//!
//! Interactive shell over the command agent. Three modes:
//! natural-language chat, goal planning, and direct tool commands.

use clap::{Parser, ValueEnum};
use command_agent::agent::direct::{self, DirectCommand};
use command_agent::agent::{self, ChatAgent, PlanningAgent};
use command_agent::core::config::{self, AgentConfig};
use command_agent::core::error::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Talk in plain language
    Chat,
    /// Name a goal and let the agent plan it
    Plan,
    /// Type tool commands directly
    Tools,
}

/// Natural language command agent with goal planning
#[derive(Parser, Debug)]
#[command(name = "command-agent")]
#[command(about = "Dispatch natural language commands to local tools and run goal plans")]
struct Args {
    /// Interaction mode
    #[arg(long, value_enum, default_value_t = Mode::Chat)]
    mode: Mode,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Workspace directory tool paths are resolved against
    #[arg(long)]
    root: Option<PathBuf>,

    /// Pause between plan tasks, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Run one goal plan and exit
    #[arg(long)]
    goal: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("command_agent=info")),
        )
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => AgentConfig::load_from_toml(path)?,
        None => AgentConfig::default(),
    };
    if let Some(root) = &args.root {
        settings.workspace_root = root.clone();
    }
    if let Some(delay) = args.delay_ms {
        settings.step_delay_ms = delay;
    }
    settings.validate()?;
    if config::set_config(settings).is_err() {
        tracing::warn!("Config already initialized");
    }
    let settings = config::config();

    tracing::info!(
        "Command agent starting in {:?} mode (workspace {})",
        args.mode,
        settings.workspace_root.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(goal) = &args.goal {
        let mut planner = PlanningAgent::from_config(settings)?;
        planner.run_goal(goal, &mut out)?;
        return Ok(());
    }

    match args.mode {
        Mode::Chat => run_chat(settings, &mut out),
        Mode::Plan => run_plan(settings, &mut out),
        Mode::Tools => run_tools(settings, &mut out),
    }
}

/// Prompt and read one line; `None` at end of input or on an exit word
fn prompt(out: &mut impl Write, text: &str) -> Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim().to_string();
    if agent::is_exit(&line) {
        return Ok(None);
    }
    Ok(Some(line))
}

fn run_chat(settings: &AgentConfig, out: &mut impl Write) -> Result<()> {
    let mut chat = ChatAgent::from_config(settings);

    writeln!(out, "\n=== COMMAND AGENT: CHAT ===")?;
    writeln!(out, "Try:")?;
    writeln!(out, "  - \"README 파일 읽어줘\" / \"read file README.md\"")?;
    writeln!(out, "  - \"프로젝트에 뭐가 있는지 보여줘\"")?;
    writeln!(out, "  - \"2 더하기 3은 얼마야?\"")?;
    writeln!(out, "  - \"test.txt 파일 만들어줘\"")?;
    writeln!(out, "  - \"지금 몇시야?\"")?;
    writeln!(out, "  - \"프로젝트 분석해줘\"")?;
    writeln!(out, "Type context to see what the agent remembers, quit to exit.\n")?;

    while let Some(line) = prompt(out, "> ")? {
        if line.is_empty() {
            continue;
        }
        if line == "context" {
            writeln!(out, "\n{}\n", chat.context().summary())?;
            continue;
        }
        let reply = chat.respond(&line);
        if reply.understood {
            writeln!(
                out,
                "\nUnderstood ({:.0}% confident): {}",
                reply.intent.confidence * 100.0,
                reply.intent.action
            )?;
        }
        writeln!(out, "\n{}\n", reply.text)?;
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

fn run_plan(settings: &AgentConfig, out: &mut impl Write) -> Result<()> {
    let mut planner = PlanningAgent::from_config(settings)?;

    writeln!(out, "\n=== COMMAND AGENT: PLANNING ===")?;
    writeln!(out, "Goals:")?;
    for template in planner.planner().templates() {
        writeln!(
            out,
            "  - {} (say: {})",
            template.label,
            template.keywords.join(" / ")
        )?;
    }
    writeln!(out, "  - memory : show remembered tasks")?;
    writeln!(out, "  - stats  : show task statistics")?;
    writeln!(out, "Type quit to exit.\n")?;

    while let Some(line) = prompt(out, "> ")? {
        if line.is_empty() {
            continue;
        }
        planner.handle(&line, out)?;
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

fn run_tools(settings: &AgentConfig, out: &mut impl Write) -> Result<()> {
    let mut planner = PlanningAgent::from_config(settings)?;

    writeln!(out, "\n=== COMMAND AGENT: TOOLS ===")?;
    writeln!(out, "  auto            - run the demo plan")?;
    writeln!(out, "  tools           - list available tools")?;
    writeln!(out, "  <tool> <args>   - run a tool")?;
    writeln!(out, "  quit            - exit\n")?;

    while let Some(line) = prompt(out, "> ")? {
        if line.is_empty() {
            continue;
        }
        match direct::parse(&line) {
            Ok(DirectCommand::Tools) => writeln!(out, "\nAvailable tools:\n{}\n", direct::tool_listing())?,
            Ok(DirectCommand::Demo) => {
                planner.run_goal("demo", out)?;
            }
            Ok(DirectCommand::Invoke { tool, args }) => {
                let result = planner.executor().dispatcher().invoke(tool.name(), &args);
                writeln!(out, "\n{}\n", result.display_text())?;
            }
            Err(e) => writeln!(out, "{}\n", e)?,
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}
