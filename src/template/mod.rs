//! Scheme templates and their placeholder resolution
//!
//! A template is an editor color-scheme XML document whose `option` values may
//! hold placeholders. Color placeholders name a palette entry, font
//! placeholders combine emphasis directives:
//!
//! ```text
//! <scheme name="One Dark" version="142">
//!   <colors>
//!     <option name="CARET_ROW_COLOR" value="$bg1$"/>
//!   </colors>
//!   <attributes>
//!     <option name="DEFAULT_KEYWORD">
//!       <value>
//!         <option name="FOREGROUND" value="$purple$"/>
//!         <option name="FONT_TYPE" value="%theme^keywords%"/>
//!       </value>
//!     </option>
//!   </attributes>
//! </scheme>
//! ```

mod error;
pub mod placeholder;
mod resolver;
mod tree;

pub use error::ResolveError;
pub use placeholder::{classify, extract, Extraction, FontDirective, FontSpec, Placeholder};
pub use resolver::{resolve_template, resolve_tree, ResolutionContext, ResolutionStats, DEFAULT_SCHEME_NAME};
pub use tree::{Attribute, Element, Node, NodeId, Template, TemplateTree};
