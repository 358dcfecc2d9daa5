//! Input problems the pipeline tolerates, and once-per-session reporting
//!
//! The pipeline runs inside the render loop, so a bad input is coerced to a
//! safe default instead of raising. Logging that coercion on every frame would
//! bury everything else in the log, hence [`DiagnosticLog`].

/// A runtime data problem that was coerced to a safe default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputIssue {
    /// Playhead was NaN or infinite (treated as 0.0)
    NonFinitePlayhead = 0,
    /// Sample rate was zero, negative, non-finite or above the supported maximum
    InvalidSampleRate = 1,
    /// Duration was zero, negative or non-finite
    InvalidDuration = 2,
    /// Phantom padding was negative, NaN or too long (clamped)
    InvalidPadding = 3,
    /// Window duration was negative, NaN or too long (clamped)
    InvalidWindow = 4,
    /// The loaded buffer has no samples
    EmptyBuffer = 5,
    /// Global max amplitude was not a positive finite number (boost skipped)
    InvalidMaxAmplitude = 6,
    /// Transition progress was NaN or infinite (transition ignored)
    NonFiniteTransition = 7,
}

impl InputIssue {
    pub const ALL: [InputIssue; 8] = [
        InputIssue::NonFinitePlayhead,
        InputIssue::InvalidSampleRate,
        InputIssue::InvalidDuration,
        InputIssue::InvalidPadding,
        InputIssue::InvalidWindow,
        InputIssue::EmptyBuffer,
        InputIssue::InvalidMaxAmplitude,
        InputIssue::NonFiniteTransition,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << self as u8
    }

    pub fn describe(self) -> &'static str {
        match self {
            InputIssue::NonFinitePlayhead => "non-finite playhead, using 0.0",
            InputIssue::InvalidSampleRate => "invalid sample rate, using fallback rate",
            InputIssue::InvalidDuration => "invalid duration, deriving from sample count",
            InputIssue::InvalidPadding => "invalid phantom padding, clamped to supported range",
            InputIssue::InvalidWindow => "invalid window duration, clamped to supported range",
            InputIssue::EmptyBuffer => "empty waveform buffer, producing silence",
            InputIssue::InvalidMaxAmplitude => "non-positive global max amplitude, boost disabled",
            InputIssue::NonFiniteTransition => "non-finite transition progress, ignoring transition",
        }
    }
}

/// Allocation-free set of [`InputIssue`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueSet(u16);

impl IssueSet {
    pub fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub fn insert(&mut self, issue: InputIssue) {
        self.0 |= issue.bit();
    }

    #[inline]
    pub fn contains(&self, issue: InputIssue) -> bool {
        self.0 & issue.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = InputIssue> + '_ {
        InputIssue::ALL.into_iter().filter(move |issue| self.contains(*issue))
    }
}

/// Logs each [`InputIssue`] at warn level the first time it is seen
///
/// Cleared on track load / session reset so a new track gets fresh reports.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    reported: IssueSet,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an issue; returns true if this is its first report
    pub fn report(&mut self, issue: InputIssue) -> bool {
        if self.reported.contains(issue) {
            return false;
        }
        self.reported.insert(issue);
        log::warn!("View pipeline: {}", issue.describe());
        true
    }

    pub fn report_all(&mut self, issues: IssueSet) {
        for issue in issues.iter() {
            self.report(issue);
        }
    }

    pub fn reported(&self) -> IssueSet {
        self.reported
    }

    pub fn clear(&mut self) {
        self.reported = IssueSet::new();
    }
}
