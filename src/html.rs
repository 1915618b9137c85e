//! HTML tag constructors, style blocks and documents
//!
//! Every function here is shorthand for [`Element::new`] with a fixed tag
//! name. Void elements are created self-closing.

use crate::node::{Element, Node};

macro_rules! tags {
    ($($fn_name:ident => $tag:literal),* $(,)?) => {
        $(
            #[doc = concat!("`<", $tag, ">` element")]
            pub fn $fn_name() -> Element {
                Element::new($tag)
            }
        )*
    };
}

tags! {
    a => "a",
    abbr => "abbr",
    address => "address",
    area => "area/",
    article => "article",
    aside => "aside",
    audio => "audio",
    b => "b",
    base => "base/",
    bdi => "bdi",
    bdo => "bdo",
    blockquote => "blockquote",
    body => "body",
    br => "br/",
    button => "button",
    canvas => "canvas",
    caption => "caption",
    cite => "cite",
    code => "code",
    col => "col/",
    colgroup => "colgroup",
    datalist => "datalist",
    dd => "dd",
    del => "del",
    details => "details",
    dfn => "dfn",
    div => "div",
    dl => "dl",
    dt => "dt",
    em => "em",
    embed => "embed/",
    fieldset => "fieldset",
    figcaption => "figcaption",
    figure => "figure",
    footer => "footer",
    form => "form",
    h1 => "h1",
    h2 => "h2",
    h3 => "h3",
    h4 => "h4",
    h5 => "h5",
    h6 => "h6",
    head => "head",
    header => "header",
    hgroup => "hgroup",
    hr => "hr/",
    html => "html",
    i => "i",
    iframe => "iframe",
    img => "img/",
    input => "input/",
    ins => "ins",
    kbd => "kbd",
    keygen => "keygen",
    label => "label",
    legend => "legend",
    li => "li",
    link => "link/",
    map => "map",
    mark => "mark",
    menu => "menu",
    meta => "meta/",
    meter => "meter",
    nav => "nav",
    noscript => "noscript",
    object => "object",
    ol => "ol",
    optgroup => "optgroup",
    option => "option",
    output => "output",
    p => "p",
    param => "param/",
    pre => "pre",
    progress => "progress",
    q => "q",
    rp => "rp",
    rt => "rt",
    ruby => "ruby",
    s => "s",
    samp => "samp",
    script => "script",
    section => "section",
    select => "select",
    small => "small",
    source => "source/",
    span => "span",
    strong => "strong",
    sub => "sub",
    summary => "summary",
    sup => "sup",
    table => "table",
    tbody => "tbody",
    td => "td",
    textarea => "textarea",
    tfoot => "tfoot",
    th => "th",
    thead => "thead",
    time => "time",
    title => "title",
    tr => "tr",
    track => "track/",
    u => "u",
    ul => "ul",
    var => "var",
    video => "video",
    wbr => "wbr",
}

const DOCTYPE: &str = "<!DOCTYPE html>\n\n";

/// A complete HTML document: the doctype followed by `children`
pub fn doc<I>(children: I) -> Element
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Element::wrapper()
        .child(Node::raw(DOCTYPE))
        .with_children(children)
}

/// A `<style>` block built from selectors and their declarations
///
/// Rules keep insertion order; adding a selector again replaces its
/// declarations.
#[derive(Debug, Clone, Default)]
pub struct Style {
    rules: Vec<(String, Vec<(String, String)>)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule
    pub fn rule<K, V, I>(mut self, selector: impl Into<String>, declarations: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let selector = selector.into();
        let declarations: Vec<(String, String)> = declarations
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        match self.rules.iter_mut().find(|(s, _)| *s == selector) {
            Some((_, existing)) => *existing = declarations,
            None => self.rules.push((selector, declarations)),
        }
        self
    }

    /// The block as markup; the CSS is emitted verbatim
    pub fn to_markup(&self) -> String {
        let mut css = String::from("\n<style>\n");
        for (selector, declarations) in &self.rules {
            css.push_str(&format!("  {} {{\n", selector));
            for (property, value) in declarations {
                css.push_str(&format!("    {}: {};\n", property, value));
            }
            css.push_str("  }\n");
        }
        css.push_str("</style>\n");
        css
    }
}

impl From<Style> for Node {
    fn from(style: Style) -> Self {
        Node::Raw(style.to_markup())
    }
}
