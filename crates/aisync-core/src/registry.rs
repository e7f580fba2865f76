//! Target registry
//!
//! A static table of target descriptors: where a target's output lives,
//! which source subtrees feed it, how files are filtered, and which
//! converter shapes them. Descriptors are configuration — built once at
//! engine construction and never mutated.

use aisync_fs::NormalizedPath;

use crate::convert::{Converter, FieldMap, SettingsBuilder};
use crate::{Error, Result};

/// Source directory of command documents, shared by every target and by
/// the settings fold.
pub const COMMANDS_DIR: &str = ".ai/commands";

/// Suffix filter applied to files during a tree mirror pass.
#[derive(Debug, Clone)]
pub enum ExtensionFilter {
    /// Every file qualifies
    All,
    /// Only files ending in one of the given suffixes qualify
    Any(Vec<&'static str>),
}

impl ExtensionFilter {
    /// Whether a file name passes the filter.
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Any(suffixes) => suffixes.iter().any(|s| file_name.ends_with(s)),
        }
    }
}

/// One source subtree mirrored into a target's output layout.
#[derive(Debug, Clone)]
pub struct SourceTree {
    /// Source directory, relative to the repository root
    pub source: &'static str,
    /// Destination directory, relative to the target's destination root
    pub dest: &'static str,
    pub filter: ExtensionFilter,
    pub converter: Converter,
}

/// Immutable description of one sync target.
#[derive(Debug, Clone)]
pub struct TargetDescriptor {
    pub name: &'static str,
    /// Root of the target's output layout, relative to the repository root
    pub destination_root: &'static str,
    /// Root instruction file: (template under `.ai/template/`, output path
    /// relative to the repository root), copied verbatim when present
    pub root_template: Option<(&'static str, &'static str)>,
    /// Source subtrees mirrored for this target
    pub trees: Vec<SourceTree>,
    /// Aggregate settings artifact: (path relative to the destination root,
    /// builder), regenerated before any tree is mirrored
    pub settings: Option<(&'static str, SettingsBuilder)>,
}

/// Registry of all known targets.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<TargetDescriptor>,
}

impl TargetRegistry {
    /// Create a registry with the built-in targets: claude, gemini, cursor.
    pub fn with_builtins() -> Self {
        Self {
            targets: vec![claude(), gemini(), cursor()],
        }
    }

    /// Create a registry from explicit descriptors.
    pub fn new(targets: Vec<TargetDescriptor>) -> Self {
        Self { targets }
    }

    /// Look up a target by name.
    pub fn get(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// All registered target names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.targets.iter().map(|t| t.name).collect()
    }

    /// All registered targets, in registration order.
    pub fn all(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    /// Resolve requested names into descriptors.
    ///
    /// Every name is validated before any descriptor is returned, so an
    /// unknown name aborts the caller's run before any side effect.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTarget` for the first name absent from the registry.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<&TargetDescriptor>> {
        names
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| Error::UnknownTarget {
                    name: name.clone(),
                })
            })
            .collect()
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn markdown() -> ExtensionFilter {
    ExtensionFilter::Any(vec![".md"])
}

fn verbatim() -> Converter {
    Converter::Mirror {
        fields: Vec::new(),
        override_key: None,
    }
}

fn claude() -> TargetDescriptor {
    TargetDescriptor {
        name: "claude",
        destination_root: ".claude",
        root_template: Some(("CLAUDE.md", "CLAUDE.md")),
        trees: vec![
            SourceTree {
                source: COMMANDS_DIR,
                dest: "commands",
                filter: markdown(),
                converter: Converter::Mirror {
                    fields: vec![FieldMap::keep("name"), FieldMap::keep("description")],
                    override_key: Some("claude-code"),
                },
            },
            SourceTree {
                source: ".ai/adapters/claude-code/agents",
                dest: "agents",
                filter: markdown(),
                converter: verbatim(),
            },
            SourceTree {
                source: ".ai/adapters/claude-code/hooks",
                dest: "hooks",
                filter: ExtensionFilter::Any(vec![".py"]),
                converter: verbatim(),
            },
            SourceTree {
                source: ".ai/adapters/claude-code/output-styles",
                dest: "output-styles",
                filter: markdown(),
                converter: verbatim(),
            },
            SourceTree {
                source: ".ai/adapters/claude-code/skills",
                dest: "skills",
                filter: ExtensionFilter::All,
                converter: verbatim(),
            },
        ],
        settings: Some(("settings.json", SettingsBuilder::Claude)),
    }
}

fn gemini() -> TargetDescriptor {
    TargetDescriptor {
        name: "gemini",
        destination_root: ".gemini",
        root_template: Some(("GEMINI.md", "GEMINI.md")),
        trees: vec![
            SourceTree {
                source: COMMANDS_DIR,
                dest: "commands",
                filter: markdown(),
                converter: Converter::Manifest {
                    override_key: "gemini-cli",
                },
            },
            SourceTree {
                source: ".ai/adapters/gemini-cli/converters",
                dest: "converters",
                filter: ExtensionFilter::All,
                converter: verbatim(),
            },
        ],
        settings: Some(("settings.json", SettingsBuilder::Gemini)),
    }
}

fn cursor() -> TargetDescriptor {
    TargetDescriptor {
        name: "cursor",
        destination_root: ".cursor",
        root_template: Some((".cursorrules", ".cursorrules")),
        trees: vec![
            SourceTree {
                source: COMMANDS_DIR,
                dest: "commands",
                filter: markdown(),
                converter: Converter::Mirror {
                    fields: vec![FieldMap::keep("description")],
                    override_key: Some("cursor"),
                },
            },
            SourceTree {
                source: ".ai/adapters/cursor/rules",
                dest: "rules",
                filter: markdown(),
                converter: verbatim(),
            },
        ],
        settings: None,
    }
}

/// Resolve a target's destination root against the repository root.
pub fn destination_root(root: &NormalizedPath, target: &TargetDescriptor) -> NormalizedPath {
    root.join(target.destination_root)
}
