//! # CLI
//!
//! One possible client of the library. Everything terminal-specific lives here:
//! argument parsing (`crate::args`), data directory and logging setup (`setup`),
//! per-command handlers (`commands`) and colored output (`print`).
//!
//! Running `snipz` with no subcommand lists the snippets.
//!
//! ## Numbering
//!
//! Snippets are shown with 1-based numbers, their position in the stored list. Commands
//! accept those numbers, ranges (`2-4`) and UUIDs. Numbers are resolved against the
//! list at the moment the command runs.
//!
//! ## Masking
//!
//! With `mask_sensitive` on (the default), credential values are masked whenever
//! snippet text is printed. `show --reveal` prints them as stored.

mod commands;
mod print;
pub mod setup;

use crate::args::{Cli, Commands};
use clap::Parser;
use commands::*;
use setup::{init_context, init_logging};
use snipz::error::Result;
use snipz::model::SnippetPatch;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Masking needs no store; keep it usable without a data directory.
    if let Some(Commands::Mask { text }) = &cli.command {
        return handle_mask(text.clone());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            category,
            tag,
        }) => handle_list(&mut ctx, search, category, tag),
        Some(Commands::Show { selectors, reveal }) => handle_show(&mut ctx, selectors, reveal),
        Some(Commands::Add {
            text,
            label,
            tags,
            markdown,
            template,
        }) => handle_add(&mut ctx, text, label, tags, markdown, template),
        Some(Commands::Use { selector }) => handle_use(&mut ctx, selector),
        Some(Commands::Update {
            selectors,
            text,
            label,
            tags,
            markdown,
            template,
        }) => {
            let mut patch = SnippetPatch::new();
            if let Some(text) = text {
                patch = patch.text(text);
            }
            if let Some(label) = label {
                patch = patch.label(label);
            }
            if let Some(tags) = tags {
                let tags = tags
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty());
                patch = patch.tags(tags);
            }
            if let Some(markdown) = markdown {
                patch = patch.markdown(markdown);
            }
            if let Some(template) = template {
                patch = patch.template(template);
            }
            handle_update(&mut ctx, selectors, patch)
        }
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Tag { action }) => handle_tag(&mut ctx, action),
        Some(Commands::Toggle { flag, selectors }) => handle_toggle(&mut ctx, flag, selectors),
        Some(Commands::Tags) => handle_tags(&mut ctx),
        Some(Commands::Templates) => handle_templates(&mut ctx),
        Some(Commands::Import { path, dry_run }) => handle_import(&mut ctx, path, dry_run),
        Some(Commands::Export {
            path,
            format,
            selectors,
        }) => handle_export(&mut ctx, path, format, selectors),
        Some(Commands::Mask { .. }) => Ok(()),
        Some(Commands::Genpass {
            length,
            no_uppercase,
            no_digits,
            no_special,
            strict,
        }) => handle_genpass(&ctx, length, no_uppercase, no_digits, no_special, strict),
        Some(Commands::Category { action }) => handle_category(&mut ctx, action),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, None, None),
    }
}
