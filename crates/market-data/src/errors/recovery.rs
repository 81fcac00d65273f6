/// Classification for how the consumer should react to a failed fetch.
///
/// Every failure is surfaced to the caller; nothing is retried
/// automatically inside this crate.
///
/// # Behavior Summary
///
/// | Class | Network call wasted? | Sensible reaction |
/// |-------|---------------------|-------------------|
/// | `PromptForInput` | No (rejected locally) | Fix the symbol list |
/// | `Retry` | Yes | Re-submit as-is |
/// | `RetryOrShortenPeriod` | Yes | Re-submit, or pick a shorter period |
/// | `NothingFound` | Yes | Try different symbols |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Recovery {
    /// The request never left the process - the symbol list was empty,
    /// blank, or over the backend's limit. Retrying the same input
    /// cannot succeed; the input itself has to change.
    PromptForInput,

    /// A transient transport or backend failure. The same request may
    /// succeed if the user re-submits it.
    Retry,

    /// The batched fetch ran past its deadline. Large periods produce
    /// large payloads, so shortening the period is a second way out
    /// besides plain re-submission.
    RetryOrShortenPeriod,

    /// The backend answered cleanly but had nothing for these symbols.
    /// Re-submitting the identical request is pointless.
    NothingFound,
}
