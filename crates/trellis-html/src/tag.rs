//! Element, attribute and event name tables.
//!
//! [§ 4 The elements of HTML](https://html.spec.whatwg.org/multipage/#toc-semantics)
//! [§ 3.2.5 Content models](https://html.spec.whatwg.org/multipage/dom.html#content-models)
//!
//! One enumeration per name space, with the capabilities the serializer
//! needs looked up from the tag instead of carried by one type per element.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// What an element may contain, as far as serialization is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentModel {
    /// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
    /// "Void elements only have a start tag; end tags must not be specified."
    Void,
    /// [§ 13.1.2.1 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
    /// "Raw text elements can have text, though it has restrictions."
    ///
    /// Text children are written without escaping.
    RawText,
    /// Any other element.
    Normal,
}

/// Serialization capabilities of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagInfo {
    /// Void, raw text or normal.
    pub content: ContentModel,
    /// Introduced by HTML5; unknown to HTML4 and XHTML1 validators.
    pub html5_only: bool,
    /// Phrasing content that stays on the line of its parent when indenting.
    pub inline: bool,
}

/// An HTML element name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum HtmlTag {
    A,
    Abbr,
    Address,
    Area,
    Article,
    Aside,
    Audio,
    B,
    Base,
    Bdi,
    Blockquote,
    Body,
    Br,
    Button,
    Canvas,
    Caption,
    Cite,
    Code,
    Col,
    Colgroup,
    Dd,
    Details,
    Div,
    Dl,
    Dt,
    Em,
    Embed,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Head,
    Header,
    Hr,
    Html,
    I,
    Iframe,
    Img,
    Input,
    Label,
    Legend,
    Li,
    Link,
    Main,
    Mark,
    Meta,
    Nav,
    Noscript,
    Object,
    Ol,
    Optgroup,
    Option,
    P,
    Param,
    Pre,
    Script,
    Section,
    Select,
    Small,
    Source,
    Span,
    Strong,
    Style,
    Sub,
    Summary,
    Sup,
    Table,
    Tbody,
    Td,
    Textarea,
    Tfoot,
    Th,
    Thead,
    Time,
    Title,
    Tr,
    Track,
    U,
    Ul,
    Video,
    Wbr,
}

impl HtmlTag {
    /// The lower-case element name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Serialization capabilities of this tag.
    #[must_use]
    pub const fn info(self) -> TagInfo {
        use HtmlTag::{
            A, Abbr, Area, Article, Aside, Audio, B, Base, Bdi, Br, Button, Canvas, Cite, Code,
            Col, Details, Em, Embed, Figcaption, Figure, Footer, Header, Hr, I, Img, Input, Label,
            Link, Main, Mark, Meta, Nav, Param, Script, Section, Select, Small, Source, Span,
            Strong, Style, Sub, Summary, Sup, Textarea, Time, Track, U, Video, Wbr,
        };

        let content = match self {
            Area | Base | Br | Col | Embed | Hr | Img | Input | Link | Meta | Param | Source
            | Track | Wbr => ContentModel::Void,
            Script | Style => ContentModel::RawText,
            _ => ContentModel::Normal,
        };
        let html5_only = matches!(
            self,
            Article
                | Aside
                | Audio
                | Bdi
                | Canvas
                | Details
                | Figcaption
                | Figure
                | Footer
                | Header
                | Main
                | Mark
                | Nav
                | Section
                | Source
                | Summary
                | Time
                | Track
                | Video
                | Wbr
        );
        let inline = matches!(
            self,
            A | Abbr
                | B
                | Bdi
                | Br
                | Button
                | Cite
                | Code
                | Em
                | I
                | Img
                | Input
                | Label
                | Mark
                | Select
                | Small
                | Span
                | Strong
                | Sub
                | Sup
                | Textarea
                | Time
                | U
                | Wbr
        );
        TagInfo {
            content,
            html5_only,
            inline,
        }
    }

    /// Whether the element has no end tag and no children.
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(self.info().content, ContentModel::Void)
    }
}

/// A built-in attribute name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum HtmlAttr {
    Id,
    Class,
    Style,
    Title,
    Lang,
    Dir,
    Hidden,
    Tabindex,
    Href,
    Target,
    Rel,
    Src,
    Alt,
    Type,
    Name,
    Value,
    Width,
    Height,
    Action,
    Method,
    For,
    Placeholder,
    Checked,
    Disabled,
    Selected,
    Readonly,
    Multiple,
    Required,
    Autofocus,
    Media,
    Charset,
    Content,
    #[strum(serialize = "http-equiv")]
    HttpEquiv,
    Colspan,
    Rowspan,
    Defer,
    Async,
}

impl HtmlAttr {
    /// The attribute name as written in markup.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
    ///
    /// "The presence of a boolean attribute on an element represents the
    /// true value, and the absence of the attribute represents the false
    /// value."
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(
            self,
            Self::Hidden
                | Self::Checked
                | Self::Disabled
                | Self::Selected
                | Self::Readonly
                | Self::Multiple
                | Self::Required
                | Self::Autofocus
                | Self::Defer
                | Self::Async
        )
    }
}

/// An event handler content attribute (`onclick`, `onload`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum HtmlEvent {
    OnLoad,
    OnUnload,
    OnClick,
    OnDblClick,
    OnMouseDown,
    OnMouseUp,
    OnMouseOver,
    OnMouseOut,
    OnMouseMove,
    OnKeyDown,
    OnKeyUp,
    OnKeyPress,
    OnFocus,
    OnBlur,
    OnChange,
    OnSubmit,
    OnReset,
    OnSelect,
    OnInput,
    OnResize,
    OnScroll,
}

impl HtmlEvent {
    /// The attribute name as written in markup.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}
