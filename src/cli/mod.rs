//! CLI module - Command-line interface for Folio
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::ContentKind;

/// Folio - Portfolio content backend
/// Serves blog posts, projects, research ideas and a resume over JSON
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Replace all catalog content with a JSON fixture
    Seed {
        /// Path to the fixture document
        file: PathBuf,
    },

    /// Validate configuration, database connectivity and resume documents
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Delete a catalog item with its translations and tag links
    #[command(alias = "rm")]
    Remove {
        /// Kind of item
        #[arg(value_enum)]
        kind: KindArg,

        /// Item id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "post")]
    Blog,
    #[value(alias = "project")]
    Projects,
    #[value(alias = "idea")]
    Ideas,
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Blog => Self::BlogPost,
            KindArg::Projects => Self::Project,
            KindArg::Ideas => Self::Idea,
        }
    }
}

pub use commands::*;
