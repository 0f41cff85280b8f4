/// A single on/off instruction for one switch index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCommand {
    On,
    Off,
}

impl SwitchCommand {
    /// Renders the command line the controller firmware expects.
    ///
    /// On is `{base_command}{index}`. Off is `{base_command}a{index - 1}`:
    /// the firmware addresses off slots with an "a" prefix and zero-based
    /// numbering. That asymmetry is the wire convention of the device, not
    /// something to normalize away.
    pub fn render(&self, base_command: &str, index: u32) -> String {
        debug_assert!(index >= 1, "switch indices start at 1");
        match self {
            SwitchCommand::On => format!("{base_command}{index}"),
            SwitchCommand::Off => format!("{base_command}a{}", index - 1),
        }
    }

    /// The cached state a switch should hold once this command is on the wire.
    pub fn target_state(&self) -> bool {
        matches!(self, SwitchCommand::On)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_command_appends_the_index() {
        assert_eq!(SwitchCommand::On.render("CMD", 2), "CMD2");
        assert_eq!(SwitchCommand::On.render("SW", 10), "SW10");
    }

    #[test]
    fn off_command_uses_the_a_prefix_and_the_previous_index() {
        assert_eq!(SwitchCommand::Off.render("CMD", 2), "CMDa1");
        assert_eq!(SwitchCommand::Off.render("CMD", 1), "CMDa0");
    }

    #[test]
    #[should_panic(expected = "switch indices start at 1")]
    fn index_zero_has_no_command() {
        SwitchCommand::Off.render("CMD", 0);
    }

    #[test]
    fn target_state_matches_the_command() {
        assert!(SwitchCommand::On.target_state());
        assert!(!SwitchCommand::Off.target_state());
    }
}
