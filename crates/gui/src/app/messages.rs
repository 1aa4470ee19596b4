use tool_panels_core::execution::{ProcessHandle, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Nbtscan,
    Rtgen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NbtscanField {
    Subnet,
    ScanRange,
    Timeout,
    Bandwidth,
    Retransmits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtgenField {
    HashAlgorithm,
    Charset,
    PlaintextLengthMin,
    PlaintextLengthMax,
    TableIndex,
    ChainLength,
    ChainCount,
    PartIndex,
}

#[derive(Debug, Clone)]
pub enum Message {
    PanelSelected(PanelId),
    AdvancedToggled(bool),
    DumpPacketsToggled(bool),
    NbtscanChanged(NbtscanField, String),
    RtgenChanged(RtgenField, String),
    Submit(PanelId),
    Started(PanelId, Result<ProcessHandle, String>),
    Session(PanelId, SessionEvent),
    Cancel(PanelId),
    ClearOutput(PanelId),
    SavePathChanged(PanelId, String),
    Save(PanelId),
    AvailabilityChecked(PanelId, Vec<String>),
    DismissInstallNotice(PanelId),
}
