//! Turns the HTML produced by the term-condition editor into a flat list of
//! render instructions. Layout never looks at markup.

use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

lazy_static! {
    static ref VOID_TAG: Regex =
        Regex::new(r"(?i)<(br|hr|img|input|meta|link|col|wbr)\b([^>]*?)/?>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref BLANK_RUN: Regex = Regex::new(r"[ \t\r\n]+").unwrap();
    static ref NAMED_ENTITY: Regex = Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").unwrap();
    static ref ANY_ENTITY: Regex =
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6}|[A-Za-z][A-Za-z0-9]*);").unwrap();
}

/// The five entities XML itself understands
const XML_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

/// Named HTML entities editors commonly emit
fn html_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "lsquo" => '‘',
        "rsquo" => '’',
        "sbquo" => '‚',
        "ldquo" => '“',
        "rdquo" => '”',
        "bdquo" => '„',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "bull" => '•',
        "middot" => '·',
        "laquo" => '«',
        "raquo" => '»',
        "euro" => '€',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "deg" => '°',
        "plusmn" => '±',
        "times" => '×',
        "divide" => '÷',
        "frac12" => '½',
        "frac14" => '¼',
        "frac34" => '¾',
        "sup2" => '²',
        "sup3" => '³',
        "micro" => 'µ',
        "para" => '¶',
        "sect" => '§',
        "cent" => '¢',
        "pound" => '£',
        "yen" => '¥',
        "iexcl" => '¡',
        "iquest" => '¿',
        "shy" => '\u{ad}',
        "agrave" => 'à',
        "aacute" => 'á',
        "acirc" => 'â',
        "atilde" => 'ã',
        "auml" => 'ä',
        "aring" => 'å',
        "ccedil" => 'ç',
        "egrave" => 'è',
        "eacute" => 'é',
        "ecirc" => 'ê',
        "euml" => 'ë',
        "igrave" => 'ì',
        "iacute" => 'í',
        "icirc" => 'î',
        "iuml" => 'ï',
        "ntilde" => 'ñ',
        "ograve" => 'ò',
        "oacute" => 'ó',
        "ocirc" => 'ô',
        "otilde" => 'õ',
        "ouml" => 'ö',
        "oslash" => 'ø',
        "ugrave" => 'ù',
        "uacute" => 'ú',
        "ucirc" => 'û',
        "uuml" => 'ü',
        "yacute" => 'ý',
        "yuml" => 'ÿ',
        "szlig" => 'ß',
        "Agrave" => 'À',
        "Aacute" => 'Á',
        "Acirc" => 'Â',
        "Auml" => 'Ä',
        "Ccedil" => 'Ç',
        "Egrave" => 'È',
        "Eacute" => 'É',
        "Ecirc" => 'Ê',
        "Iacute" => 'Í',
        "Ntilde" => 'Ñ',
        "Oacute" => 'Ó',
        "Ouml" => 'Ö',
        "Uacute" => 'Ú',
        "Uuml" => 'Ü',
        _ => return None,
    };
    Some(c)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    Heading(String),
    Paragraph(String),
    NumberedItem { number: usize, text: String },
    BulletItem(String),
}

#[derive(Debug)]
enum Node {
    Element { name: String, children: Vec<Node> },
    Text(String),
}

const EMPHASIS: &[&str] = &["b", "strong", "i", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6"];
const BLOCKS: &[&str] = &["p", "div", "ol", "ul", "li", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Parse rich text into render instructions.
///
/// Markup that is not well-formed after void-tag normalisation degrades to a
/// single paragraph of the stripped text.
pub fn parse(html: &str) -> Vec<RenderInstruction> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    match parse_tree(html) {
        Ok(nodes) => {
            let mut out = Vec::new();
            walk_blocks(&nodes, &mut out);
            out
        }
        Err(e) => {
            tracing::warn!("Rich text is not well-formed, rendering as plain text: {}", e);
            let text = collapse(&decode_entities(&ANY_TAG.replace_all(html, " ")));
            if text.is_empty() {
                Vec::new()
            } else {
                vec![RenderInstruction::Paragraph(text)]
            }
        }
    }
}

/// Rewrite HTML-only named entities as numeric references so the XML reader
/// accepts them. Unknown names are escaped and print literally.
fn numeric_entities(html: &str) -> String {
    NAMED_ENTITY
        .replace_all(html, |caps: &regex::Captures| {
            let name = &caps[1];
            if XML_ENTITIES.contains(&name) {
                caps[0].to_string()
            } else {
                match html_entity(name) {
                    Some(c) => format!("&#{};", c as u32),
                    None => format!("&amp;{};", name),
                }
            }
        })
        .into_owned()
}

fn normalize_markup(html: &str) -> String {
    let html = numeric_entities(html);
    let html = VOID_TAG.replace_all(&html, "<$1$2/>");
    format!("<root>{}</root>", html)
}

fn parse_tree(html: &str) -> Result<Vec<Node>, quick_xml::Error> {
    let markup = normalize_markup(html);
    let mut reader = Reader::from_str(&markup);
    reader.config_mut().trim_text(false);

    // Stack of open elements; the bottom entry collects the document.
    let mut stack: Vec<(String, Vec<Node>)> = vec![(String::new(), Vec::new())];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                stack.push((name, Vec::new()));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if let Some((_, children)) = stack.last_mut() {
                    children.push(Node::Element { name, children: Vec::new() });
                }
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some((name, children)) = stack.pop() {
                        if let Some((_, parent)) = stack.last_mut() {
                            parent.push(Node::Element { name, children });
                        }
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?.into_owned();
                if let Some((_, children)) = stack.last_mut() {
                    children.push(Node::Text(text));
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                if let Some((_, children)) = stack.last_mut() {
                    children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Unwrap the synthetic <root> element
    let mut document = stack.pop().map(|(_, children)| children).unwrap_or_default();
    match document.pop() {
        Some(Node::Element { name, children }) if name == "root" && document.is_empty() => {
            Ok(children)
        }
        Some(other) => {
            document.push(other);
            Ok(document)
        }
        None => Ok(document),
    }
}

fn walk_blocks(nodes: &[Node], out: &mut Vec<RenderInstruction>) {
    let mut inline = String::new();

    for node in nodes {
        match node {
            Node::Text(text) => inline.push_str(text),
            Node::Element { name, children } => match name.as_str() {
                "br" => flush_paragraph(&mut inline, out),
                n if EMPHASIS.contains(&n) => {
                    flush_paragraph(&mut inline, out);
                    push_heading(children, out);
                }
                "ol" => {
                    flush_paragraph(&mut inline, out);
                    list_items(children)
                        .enumerate()
                        .for_each(|(i, text)| {
                            out.push(RenderInstruction::NumberedItem { number: i + 1, text })
                        });
                }
                "ul" => {
                    flush_paragraph(&mut inline, out);
                    list_items(children)
                        .for_each(|text| out.push(RenderInstruction::BulletItem(text)));
                }
                "li" => {
                    flush_paragraph(&mut inline, out);
                    let text = collapse(&inline_text(children));
                    if !text.is_empty() {
                        out.push(RenderInstruction::BulletItem(text));
                    }
                }
                "p" | "div" => {
                    flush_paragraph(&mut inline, out);
                    paragraph_or_recurse(children, out);
                }
                _ => inline.push_str(&inline_text(children)),
            },
        }
    }

    flush_paragraph(&mut inline, out);
}

fn paragraph_or_recurse(children: &[Node], out: &mut Vec<RenderInstruction>) {
    if children.iter().any(is_block) {
        walk_blocks(children, out);
        return;
    }

    // A paragraph holding nothing but one emphasised run reads as a heading
    let mut meaningful = children.iter().filter(|n| !is_blank_text(n));
    if let (Some(Node::Element { name, children: inner }), None) =
        (meaningful.next(), meaningful.next())
    {
        if EMPHASIS.contains(&name.as_str()) {
            push_heading(inner, out);
            return;
        }
    }

    let text = collapse(&inline_text(children));
    if !text.is_empty() {
        out.push(RenderInstruction::Paragraph(text));
    }
}

fn push_heading(children: &[Node], out: &mut Vec<RenderInstruction>) {
    let text = collapse(&inline_text(children));
    if !text.is_empty() {
        out.push(RenderInstruction::Heading(text));
    }
}

fn list_items(children: &[Node]) -> impl Iterator<Item = String> + '_ {
    children.iter().filter_map(|child| match child {
        Node::Element { name, children } if name == "li" => {
            let text = collapse(&inline_text(children));
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    })
}

fn flush_paragraph(buffer: &mut String, out: &mut Vec<RenderInstruction>) {
    let text = collapse(buffer);
    if !text.is_empty() {
        out.push(RenderInstruction::Paragraph(text));
    }
    buffer.clear();
}

fn is_block(node: &Node) -> bool {
    matches!(node, Node::Element { name, .. } if BLOCKS.contains(&name.as_str()))
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(t) if t.trim().is_empty())
}

fn inline_text(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        match node {
            Node::Text(t) => text.push_str(t),
            Node::Element { name, .. } if name == "br" => text.push('\n'),
            Node::Element { children, .. } => text.push_str(&inline_text(children)),
        }
    }
    text
}

/// Collapse whitespace runs per line; non-breaking spaces survive as spaces
fn collapse(text: &str) -> String {
    text.split('\n')
        .map(|line| BLANK_RUN.replace_all(line, " ").trim().replace('\u{a0}', " "))
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single-pass entity decoding for the plain-text fallback
fn decode_entities(text: &str) -> String {
    ANY_ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = match body.strip_prefix('#') {
                Some(num) => match num.strip_prefix(|c: char| c == 'x' || c == 'X') {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                }
                .and_then(char::from_u32),
                None => html_entity(body),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
