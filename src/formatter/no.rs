use crate::formatter::*;

/// A formatter that produces no output.
///
/// Useful when embedding the runner into something that does its own
/// reporting from the returned [`TestReport`](crate::TestReport).
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

macro_rules! impl_unit_from {
    [$($name:ident$(<$($generic:tt),*>)?),* $(,)?] => {$(
        impl$(<$($generic),*>)? From<$name$(<$($generic),*>)?> for () {
            fn from(_: $name$(<$($generic),*>)?) -> () {}
        })*
    };
}

impl_unit_from![
    FmtTestStart<'m>,
    FmtTestOutcome<'m>,
    FmtHookError<'h>,
    FmtRunOutcomes<'r>,
];

impl TestFormatter for NoFormatter {
    type Error = ();
    type TestStart = ();
    type TestOutcome = ();
    type HookError = ();
    type RunOutcomes = ();
}
