//! Unrecognized module line rule.

use crate::{
    core::{ModuleFile, SourceContext, SourceLocation},
    issues::UnrecognizedLineIssue,
};

pub fn check_unrecognized_lines(modules: &[ModuleFile]) -> Vec<UnrecognizedLineIssue> {
    modules
        .iter()
        .flat_map(|module| {
            module.unrecognized.iter().map(|line| {
                let indent = line.text.chars().take_while(|c| c.is_whitespace()).count();
                UnrecognizedLineIssue {
                    context: SourceContext::new(
                        SourceLocation::new(&module.file_path, line.line, indent + 1),
                        line.text.clone(),
                    ),
                }
            })
        })
        .collect()
}
