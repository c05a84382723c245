/*!
 * Wiki markup masking and restoration.
 *
 * Hyperlinks (`[[Target|display]]`) and references (`<ref>...</ref>`) must not
 * reach the translation backend verbatim. This module swaps them for
 * placeholder tokens before translation and puts link targets back afterward:
 *
 * - `element`: placeholder tokens and the masked element variants
 * - `masker`: extraction and placeholder allocation
 * - `restorer`: link reinsertion and target-language cleanup
 */

pub mod element;
pub mod masker;
pub mod restorer;

pub use self::element::{MarkupElement, MarkupKind, MaskedElement, Placeholder, translate_element};
pub use self::masker::{MaskingResult, mask};
pub use self::restorer::{CleanupRules, cleanup, restore};
