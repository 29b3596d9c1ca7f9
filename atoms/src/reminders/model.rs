/// Time-to-due range during which a reminder email fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderWindow {
    /// Due date is 23-25 hours away.
    OneDay,
    /// Due date is 30-90 minutes away.
    OneHour,
}

impl ReminderWindow {
    /// Label used in the email subject and body ("Due in 1 day").
    pub fn label(&self) -> &'static str {
        match self {
            ReminderWindow::OneDay => "1 day",
            ReminderWindow::OneHour => "1 hour",
        }
    }
}

/// Outcome of one reminder scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub scanned: usize,
    pub sent: usize,
    pub failed: usize,
}
