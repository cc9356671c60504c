//! Building blocks for HTMX fragment responses.
//!
//! A mutating endpoint answers with one *primary* fragment that lands in the
//! swap target the triggering element declared, optionally followed by
//! *out-of-band* fragments that update other parts of the page (aggregate
//! views such as counters). This crate models that response as data so the
//! composition rules can be tested without an HTTP stack.

/// How the client places a fragment into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapMode {
    /// The fragment goes to the swap target the triggering element declared;
    /// the swap strategy is chosen client-side.
    Target,
    /// The fragment replaces the DOM element whose id matches the fragment's
    /// target, independent of the request's declared target.
    OutOfBand,
}

/// A single unit of markup addressed at one DOM container.
///
/// The markup of an out-of-band fragment carries its own
/// `hx-swap-oob="true"` attribute; the `swap` field records the same intent
/// as inspectable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    target: String,
    swap: SwapMode,
    markup: String,
}

impl Fragment {
    /// Creates a fragment for the request's declared swap target.
    pub fn primary(target: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            swap: SwapMode::Target,
            markup: markup.into(),
        }
    }

    /// Creates a fragment that replaces the element with the given id,
    /// regardless of the request's declared target.
    pub fn out_of_band(target: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            swap: SwapMode::OutOfBand,
            markup: markup.into(),
        }
    }

    /// Returns the id of the DOM container this fragment addresses.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns how the client should place this fragment.
    pub fn swap(&self) -> SwapMode {
        self.swap
    }

    /// Returns the rendered markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// An ordered fragment composition: exactly one leading primary fragment,
/// then any number of out-of-band fragments.
///
/// A primary fragment with empty markup signals element removal (the swap
/// replaces the target with nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentResponse {
    fragments: Vec<Fragment>,
}

impl FragmentResponse {
    /// Creates a response around the given primary fragment.
    pub fn new(primary: Fragment) -> Self {
        debug_assert_eq!(primary.swap(), SwapMode::Target);
        Self {
            fragments: vec![primary],
        }
    }

    /// Creates a response whose primary fragment is empty, signalling removal
    /// of the element occupying the declared swap target.
    pub fn removal(target: impl Into<String>) -> Self {
        Self::new(Fragment::primary(target, ""))
    }

    /// Appends an out-of-band fragment to the response.
    pub fn with_oob(mut self, fragment: Fragment) -> Self {
        debug_assert_eq!(fragment.swap(), SwapMode::OutOfBand);
        self.fragments.push(fragment);
        self
    }

    /// Returns the fragments in wire order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Concatenates the fragments' markup in order into the response body.
    pub fn into_markup(self) -> String {
        self.fragments
            .into_iter()
            .map(|fragment| fragment.markup)
            .collect()
    }
}
