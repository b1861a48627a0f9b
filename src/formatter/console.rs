// src/formatter/console.rs

//! Human-readable formatter, styled after classic xcodebuild logs: a header
//! per target, each invocation printed as its working directory, exported
//! environment, and command line.

use std::path::Path;

use crate::formatter::Formatter;
use crate::invocation::{Executable, Invocation};
use crate::types::{BuildContext, Target};

#[derive(Debug, Clone, Default)]
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for ConsoleFormatter {
    fn begin(&mut self, context: &BuildContext) -> String {
        format!(
            "Starting {} (configuration: {})\n\n",
            context.action, context.configuration
        )
    }

    fn success(&mut self, _context: &BuildContext) -> String {
        "** BUILD SUCCEEDED **\n".to_string()
    }

    fn failure(&mut self, _context: &BuildContext, failing: &[Invocation]) -> String {
        let mut out = String::from("** BUILD FAILED **\n");
        if !failing.is_empty() {
            out.push_str("\nThe following build commands failed:\n");
            for invocation in failing {
                out.push('\t');
                out.push_str(invocation.executable.display_name());
                out.push('\n');
            }
        }
        out
    }

    fn begin_target(&mut self, context: &BuildContext, target: &Target) -> String {
        format!(
            "=== {} TARGET {} WITH CONFIGURATION {} ===\n\n",
            context.action.to_uppercase(),
            target.name(),
            context.configuration
        )
    }

    fn finish_target(&mut self, _context: &BuildContext, _target: &Target) -> String {
        "\n".to_string()
    }

    fn begin_check_dependencies(&mut self, _target: &Target) -> String {
        "Check dependencies\n\n".to_string()
    }

    fn finish_check_dependencies(&mut self, _target: &Target) -> String {
        String::new()
    }

    fn begin_write_auxiliary_files(&mut self, _target: &Target) -> String {
        "Write auxiliary files\n".to_string()
    }

    fn finish_write_auxiliary_files(&mut self, _target: &Target) -> String {
        "\n".to_string()
    }

    fn create_auxiliary_directory(&mut self, directory: &Path) -> String {
        format!("/bin/mkdir -p {}\n", directory.display())
    }

    fn write_auxiliary_file(&mut self, path: &Path) -> String {
        format!("write-file {}\n", path.display())
    }

    fn set_auxiliary_executable(&mut self, path: &Path) -> String {
        format!("chmod 0755 {}\n", path.display())
    }

    fn begin_create_product_structure(&mut self, _target: &Target) -> String {
        "Create product structure\n".to_string()
    }

    fn finish_create_product_structure(&mut self, _target: &Target) -> String {
        "\n".to_string()
    }

    fn begin_invocation(
        &mut self,
        invocation: &Invocation,
        executable_display_name: &str,
        _creates_product_structure: bool,
    ) -> String {
        let mut out = String::new();
        out.push_str(executable_display_name);
        out.push('\n');
        out.push_str(&format!(
            "    cd {}\n",
            invocation.working_directory.display()
        ));
        for (name, value) in &invocation.environment {
            out.push_str(&format!("    export {name}={value}\n"));
        }

        let command = match &invocation.executable {
            Executable::Builtin { name } => name.clone(),
            Executable::External { path, .. } => path.display().to_string(),
            Executable::Phony => String::new(),
        };
        out.push_str("    ");
        out.push_str(&command);
        for argument in &invocation.arguments {
            out.push(' ');
            out.push_str(argument);
        }
        out.push('\n');
        out
    }

    fn finish_invocation(
        &mut self,
        _invocation: &Invocation,
        _executable_display_name: &str,
        _creates_product_structure: bool,
    ) -> String {
        "\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn invocation_lines_show_cwd_env_and_command() {
        let mut environment = BTreeMap::new();
        environment.insert("LANG".to_string(), "C".to_string());

        let invocation = Invocation {
            executable: Executable::External {
                path: PathBuf::from("/usr/bin/cc"),
                display_name: "CompileC main.o".to_string(),
            },
            arguments: vec!["-c".to_string(), "main.c".to_string()],
            environment,
            working_directory: PathBuf::from("/src/app"),
            ..Invocation::default()
        };

        let mut formatter = ConsoleFormatter::new();
        let out = formatter.begin_invocation(&invocation, "CompileC main.o", false);

        assert_eq!(
            out,
            "CompileC main.o\n    cd /src/app\n    export LANG=C\n    /usr/bin/cc -c main.c\n"
        );
    }

    #[test]
    fn failure_lists_failing_commands() {
        let invocation = Invocation {
            executable: Executable::External {
                path: PathBuf::from("/usr/bin/ld"),
                display_name: "Ld app".to_string(),
            },
            ..Invocation::default()
        };

        let mut formatter = ConsoleFormatter::new();
        let context = BuildContext::new("build", "Debug");
        let out = formatter.failure(&context, &[invocation]);

        assert!(out.starts_with("** BUILD FAILED **\n"));
        assert!(out.contains("\tLd app\n"));
    }
}
