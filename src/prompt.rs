//! System-prompt construction.
//!
//! The fixed text below is the contract between the assistant widget and
//! the model: downstream fence extraction, the auto-run carve-out, and
//! prompt caching all depend on it byte-for-byte. Do not reword casually.

/// Persona line plus the header of the host-context section.
const PERSONA: &str =
    "You are a helpful assistant embedded in the user's Linux desktop.\n\n## System\n";

/// General behavior guidance, emitted after the host-context lines.
const BEHAVIOR: &str = "\nGeneral-purpose assistant. Be concise and conversational. Don't assume queries are system-related or reference specs unless relevant.\n\n";

/// Declares how fenced bash blocks are rendered on the user's side.
const CODE_BLOCK_PROTOCOL: &str = "## Code blocks\n```bash blocks are STRIPPED from your message and rendered as separate interactive widgets below it. The user sees your text and the code block as disconnected elements. Write your text as if the code block doesn't exist — never reference, introduce, or transition to it.\n\n";

/// Command-emission policy: one script per block, pkexec over sudo,
/// destructive actions gated on a plain-text confirmation.
const COMMAND_POLICY: &str = "## Commands\nOne script per ```bash block. Chain steps with &&. Use `pkexec` instead of `sudo`.\nNEVER install packages, modify system configuration, reboot, or take any action that alters the system or disrupts the user without explicit permission. When permission is needed, ask in plain text with NO code blocks — only output the code block after the user confirms.\n";

/// Extra section when the executor runs emitted blocks unattended.
const AUTO_RUN: &str = "\n## Auto-run is ENABLED\n```bash blocks execute AUTOMATICALLY. Be conservative — prefer read-only commands.\nNEVER output code blocks that install packages, modify system configuration, reboot, or disrupt the user. Describe what you would do in plain text and wait for the user to explicitly approve before outputting any code block.\nInline code (`` ` ``) does not auto-run.\n";

/// Precedence sentence preceding user-authored additions.
const CUSTOM_PRECEDENCE: &str =
    "The below instructions are given by the user and take the utmost precedence over the instructions above.\n";

const TERMINATOR: &str = "\nEND OF SYSTEM PROMPT\n";

/// Immutable snapshot of the host, supplied by the embedding shell.
/// Absent fields are omitted from the prompt entirely, no placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    pub hostname: Option<String>,
    pub os_release: Option<String>,
    pub kernel: Option<String>,
    pub desktop: Option<String>,
    pub shell: Option<String>,
    pub locale: Option<String>,
    pub user: Option<String>,
    pub cpu: Option<String>,
    pub cpu_cores: Option<u32>,
    pub cpu_arch: Option<String>,
    pub gpu: Option<String>,
    /// Multi-line memory summary, rendered verbatim.
    pub memory: Option<String>,
    /// Multi-line block-device summary, rendered verbatim.
    pub disk: Option<String>,
    /// Multi-line network-interface summary, rendered verbatim.
    pub network: Option<String>,
}

impl HostContext {
    /// Prompt fields in their fixed order: (label, value, multi-line).
    /// The order here is the order in the rendered prompt.
    fn fields(&self) -> [(&'static str, Option<String>, bool); 14] {
        [
            ("Hostname", self.hostname.clone(), false),
            ("OS", self.os_release.clone(), false),
            ("Kernel", self.kernel.clone(), false),
            ("Desktop", self.desktop.clone(), false),
            ("Shell", self.shell.clone(), false),
            ("Locale", self.locale.clone(), false),
            ("User", self.user.clone(), false),
            ("CPU", self.cpu.clone(), false),
            ("CPU Cores", self.cpu_cores.map(|n| n.to_string()), false),
            ("Architecture", self.cpu_arch.clone(), false),
            ("GPU", self.gpu.clone(), false),
            ("Memory", self.memory.clone(), true),
            ("Block Devices", self.disk.clone(), true),
            ("Network Interfaces", self.network.clone(), true),
        ]
    }
}

/// Prompt policy flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptOptions {
    /// Emitted shell blocks run without per-command confirmation.
    /// Adds the auto-run section with its destructive-action carve-out.
    pub auto_run_commands: bool,
}

/// Build the system message. Pure: no I/O, inputs untouched, identical
/// inputs yield byte-identical output.
///
/// Section order is fixed: persona, host context, behavior, code-block
/// protocol, command policy, optional auto-run, optional user additions,
/// terminator.
pub fn build_system_prompt(
    host: &HostContext,
    custom_additions: &str,
    options: &PromptOptions,
) -> String {
    let mut prompt = String::from(PERSONA);

    for (label, value, multiline) in host.fields() {
        let Some(value) = value else { continue };
        if value.is_empty() {
            continue;
        }
        if multiline {
            prompt.push_str(&format!("- {label}:\n{value}\n"));
        } else {
            prompt.push_str(&format!("- {label}: {value}\n"));
        }
    }

    prompt.push_str(BEHAVIOR);
    prompt.push_str(CODE_BLOCK_PROTOCOL);
    prompt.push_str(COMMAND_POLICY);

    if options.auto_run_commands {
        prompt.push_str(AUTO_RUN);
    }

    let custom = custom_additions.trim();
    if !custom.is_empty() {
        prompt.push_str(CUSTOM_PRECEDENCE);
        prompt.push('\n');
        prompt.push_str(custom);
        prompt.push('\n');
    }

    prompt.push_str(TERMINATOR);
    prompt
}
