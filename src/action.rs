#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Refresh,
    OpenPowerDialog,
    ClosePowerDialog,
    DialogInput(char),
    DialogBackspace,
    ApplyPowerLimit,
    ToggleRawOutput,
    ScrollRaw(i32),
    CycleTheme,
    ToggleHelp,
    None,
}
