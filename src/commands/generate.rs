use anyhow::{Context, Result, anyhow};
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::clipboard::{ArboardClipboard, Ownership};
use crate::form::{FormState, HookApi};
use crate::hooks::{Platform, Tone};
use crate::palette::Palette;
use crate::utils::{pluralize, strip_controls_and_escapes};

/// The process exits right after printing, so copied text is handed off.
const COPY_OWNERSHIP: Ownership = Ownership::Handoff;

pub struct GenerateArgs {
    pub topic: Option<String>,
    pub platform: Option<Platform>,
    pub tone: Option<Tone>,
    pub copy_all: bool,
}

/// Plain, line-oriented counterpart of the terminal form.
///
/// Without `--topic` the missing inputs are asked for interactively.
pub async fn run(api: &dyn HookApi, args: GenerateArgs) -> Result<()> {
    let mut form = FormState::new();
    match args.topic {
        Some(topic) => {
            form.topic = topic;
            form.platform = args.platform.unwrap_or_default();
            form.tone = args.tone.unwrap_or_default();
        }
        None => {
            form.topic = prompt_topic()?;
            form.platform = match args.platform {
                Some(platform) => platform,
                None => prompt_platform()?,
            };
            form.tone = match args.tone {
                Some(tone) => tone,
                None => prompt_tone()?,
            };
        }
    }

    println!(
        "{} {} hooks for {} {} in a {} {} tone…",
        Palette::paint(Palette::INFO, "hooksmith"),
        Palette::dim("generating"),
        form.platform.icon(),
        Palette::paint(Palette::ACCENT, form.platform.label()),
        form.tone.icon(),
        Palette::paint(Palette::ACCENT, form.tone.label()),
    );

    form.generate(api)
        .await
        .map_err(|err| anyhow!(err.display_message()))
        .context("Error generating hooks")?;

    print!("{}", render_hooks(form.hooks()));

    if args.copy_all && !form.hooks().is_empty() {
        if COPY_OWNERSHIP.blocks_on_set() {
            println!(
                "{}",
                Palette::dim("Holding the clipboard until another program takes it over (Ctrl+C to quit)…")
            );
        }
        tokio::task::block_in_place(|| {
            let mut clipboard = ArboardClipboard::new(COPY_OWNERSHIP)?;
            form.copy_all(&mut clipboard)
        })?;
        println!("{}", Palette::paint(Palette::SUCCESS, "All hooks copied!"));
    }

    Ok(())
}

fn render_hooks(hooks: &[String]) -> String {
    if hooks.is_empty() {
        return format!("{}\n", Palette::dim("The model returned no hooks."));
    }

    let mut out = format!(
        "\nYour viral-ready hooks ({}):\n\n",
        pluralize("hook", hooks.len())
    );
    for (index, hook) in hooks.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n",
            Palette::ordinal(index),
            Palette::paint(Palette::HOOK, strip_controls_and_escapes(hook))
        ));
    }
    out
}

fn prompt_topic() -> Result<String> {
    let topic: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Topic or idea")
        .allow_empty(true)
        .interact_text()?;
    Ok(topic)
}

fn prompt_platform() -> Result<Platform> {
    let items: Vec<String> = Platform::ALL
        .iter()
        .map(|p| format!("{} {}", p.icon(), p.label()))
        .collect();
    let default = Platform::ALL
        .iter()
        .position(|p| *p == Platform::default())
        .unwrap_or(0);
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Platform")
        .items(&items)
        .default(default)
        .interact()?;
    Ok(Platform::ALL[choice])
}

fn prompt_tone() -> Result<Tone> {
    let items: Vec<String> = Tone::ALL
        .iter()
        .map(|t| format!("{} {}", t.icon(), t.label()))
        .collect();
    let default = Tone::ALL
        .iter()
        .position(|t| *t == Tone::default())
        .unwrap_or(0);
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Tone")
        .items(&items)
        .default(default)
        .interact()?;
    Ok(Tone::ALL[choice])
}
