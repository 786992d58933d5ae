//! Typed projection of one JMRI roster document.
//!
//! The vendor export is a loosely structured tree. Everything the importer
//! needs is copied out into [`RosterLocomotive`] with explicit defaults, so
//! later stages never touch the XML tree again.
//!
//! ```text
//! <locomotive-config>
//!   <locomotive mfg=".." roadName=".." roadNumber=".." model=".." dccAddress=".." comment="..">
//!     <decoder family=".." model=".."/>
//!     <functionlabels><functionlabel num="0" lockable="true">Luces</functionlabel></functionlabels>
//!     <soundlabels><soundlabel num="1">Bocina</soundlabel></soundlabels>
//!     <values>
//!       <decoderDef><varValue item="Project Loco Name" value=".."/></decoderDef>
//!       <CVvalue name="3" value="10"/>
//!     </values>
//!   </locomotive>
//! </locomotive-config>
//! ```

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::RosterResult;

/// DCC address used when the attribute is absent or not numeric.
pub const DEFAULT_DCC_ADDRESS: u32 = 3;

/// Scalar and nested data of one `<locomotive>` node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterLocomotive {
    /// `mfg`
    pub manufacturer: String,
    /// `roadName`
    pub road_name: String,
    /// `model` attribute of the locomotive node itself
    pub model_name: String,
    /// `roadNumber`
    pub road_number: String,
    /// `dccAddress`, defaulted
    pub dcc_address: u32,
    /// `comment`
    pub comment: String,
    pub decoder: Option<DecoderNode>,
    /// `decoderDef/varValue` pairs, document order
    pub var_values: Vec<VarValue>,
    /// `values/CVvalue` pairs, document order
    pub cv_values: Vec<CvValue>,
    pub function_labels: Vec<FunctionLabel>,
    pub sound_labels: Vec<SoundLabel>,
}

/// `<decoder family=".." model=".."/>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderNode {
    pub family: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarValue {
    pub item: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvValue {
    pub name: String,
    pub value: String,
}

impl CvValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLabel {
    pub num: String,
    pub lockable: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundLabel {
    pub num: String,
    pub text: String,
}

/// Parse one roster document and project its locomotive node.
///
/// Returns `Ok(None)` when the document is well formed but carries no
/// locomotive node, and `Err(MalformedInput)` when it cannot be parsed.
pub fn extract_locomotive(xml: &str) -> RosterResult<Option<RosterLocomotive>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let root = doc.root_element();
    let loco = if root.has_tag_name("locomotive") {
        Some(root)
    } else {
        child(root, "locomotive")
    };

    Ok(loco.map(project_locomotive))
}

fn project_locomotive(node: Node<'_, '_>) -> RosterLocomotive {
    let values = child(node, "values");

    RosterLocomotive {
        manufacturer: attr(node, "mfg"),
        road_name: attr(node, "roadName"),
        model_name: attr(node, "model"),
        road_number: attr(node, "roadNumber"),
        dcc_address: parse_dcc_address(node.attribute("dccAddress")),
        comment: attr(node, "comment"),
        decoder: child(node, "decoder").map(|d| DecoderNode {
            family: d.attribute("family").map(str::to_string),
            model: d.attribute("model").map(str::to_string),
        }),
        var_values: node
            .descendants()
            .filter(|n| n.has_tag_name("decoderDef"))
            .flat_map(|def| children(def, "varValue"))
            .map(|v| VarValue {
                item: attr(v, "item"),
                value: attr(v, "value"),
            })
            .collect(),
        cv_values: values
            .map(|vals| {
                children(vals, "CVvalue")
                    .map(|cv| CvValue::new(attr(cv, "name"), attr(cv, "value")))
                    .collect()
            })
            .unwrap_or_default(),
        function_labels: child(node, "functionlabels")
            .map(|labels| {
                children(labels, "functionlabel")
                    .map(|l| FunctionLabel {
                        num: attr(l, "num"),
                        lockable: l.attribute("lockable") == Some("true"),
                        text: text(l),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        sound_labels: child(node, "soundlabels")
            .map(|labels| {
                children(labels, "soundlabel")
                    .map(|l| SoundLabel {
                        num: attr(l, "num"),
                        text: text(l),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// `"218"` → 218; absent, empty or non-digit input → [`DEFAULT_DCC_ADDRESS`].
pub fn parse_dcc_address(raw: Option<&str>) -> u32 {
    match raw {
        Some(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().unwrap_or(DEFAULT_DCC_ADDRESS)
        }
        _ => DEFAULT_DCC_ADDRESS,
    }
}

fn attr(node: Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

fn text(node: Node<'_, '_>) -> String {
    node.text().map(str::trim).unwrap_or_default().to_string()
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<locomotive-config>
    <locomotive id="218" mfg="ESU" roadName="BR 218" roadNumber="218 001-5" model="31040" dccAddress="218" comment="Diesel de pruebas">
        <decoder family="ESU LokSound V5" model="LokSound 5 DCC"/>
        <functionlabels>
            <functionlabel num="0" lockable="true">Luces</functionlabel>
            <functionlabel num="1" lockable="false"> Sonido </functionlabel>
        </functionlabels>
        <soundlabels>
            <soundlabel num="1">Motor</soundlabel>
        </soundlabels>
        <values>
            <decoderDef>
                <varValue item="Project Loco Name" value="V 218"/>
                <varValue item="Project Loco Type" value="Diesel"/>
            </decoderDef>
            <CVvalue name="1" value="3"/>
            <CVvalue name="16.2.5" value="7"/>
        </values>
    </locomotive>
</locomotive-config>"#;

    #[test]
    fn test_extract_full_document() {
        let loco = extract_locomotive(FULL).unwrap().unwrap();

        assert_eq!(loco.manufacturer, "ESU");
        assert_eq!(loco.road_name, "BR 218");
        assert_eq!(loco.model_name, "31040");
        assert_eq!(loco.road_number, "218 001-5");
        assert_eq!(loco.dcc_address, 218);
        assert_eq!(loco.comment, "Diesel de pruebas");

        let decoder = loco.decoder.unwrap();
        assert_eq!(decoder.family.as_deref(), Some("ESU LokSound V5"));
        assert_eq!(decoder.model.as_deref(), Some("LokSound 5 DCC"));

        assert_eq!(loco.var_values.len(), 2);
        assert_eq!(loco.var_values[0].value, "V 218");
        assert_eq!(loco.cv_values.len(), 2);
        assert_eq!(loco.cv_values[1].name, "16.2.5");

        assert_eq!(loco.function_labels.len(), 2);
        assert!(loco.function_labels[0].lockable);
        assert_eq!(loco.function_labels[1].text, "Sonido");
        assert_eq!(loco.sound_labels[0].num, "1");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let xml = r#"<locomotive-config><locomotive mfg="Roco"/></locomotive-config>"#;
        let loco = extract_locomotive(xml).unwrap().unwrap();

        assert_eq!(loco.manufacturer, "Roco");
        assert_eq!(loco.road_name, "");
        assert_eq!(loco.dcc_address, DEFAULT_DCC_ADDRESS);
        assert!(loco.decoder.is_none());
        assert!(loco.cv_values.is_empty());
        assert!(loco.function_labels.is_empty());
    }

    #[test]
    fn test_no_locomotive_node_is_not_an_error() {
        let xml = r#"<?xml version="1.0"?><invalid>No locomotive element here</invalid>"#;
        assert!(extract_locomotive(xml).unwrap().is_none());
    }

    #[test]
    fn test_malformed_markup() {
        let result = extract_locomotive("not valid xml at all");
        assert!(matches!(result, Err(RosterError::MalformedInput(_))));

        let result = extract_locomotive("<locomotive-config><locomotive>");
        assert!(matches!(result, Err(RosterError::MalformedInput(_))));
    }

    #[test]
    fn test_doctype_is_accepted() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE locomotive-config SYSTEM "locomotive-config.dtd">
<locomotive-config><locomotive mfg="Lenz" dccAddress="12"/></locomotive-config>"#;
        let loco = extract_locomotive(xml).unwrap().unwrap();
        assert_eq!(loco.dcc_address, 12);
    }

    #[test]
    fn test_dcc_address_fallback() {
        assert_eq!(parse_dcc_address(Some("218")), 218);
        assert_eq!(parse_dcc_address(None), 3);
        assert_eq!(parse_dcc_address(Some("")), 3);
        assert_eq!(parse_dcc_address(Some("abc")), 3);
        assert_eq!(parse_dcc_address(Some("-5")), 3);
        assert_eq!(parse_dcc_address(Some(" 7")), 3);
    }
}
