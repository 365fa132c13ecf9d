use crate::descriptor::DescriptorError;
use quick_xml::events::Event;
use quick_xml::Reader;

const ROOT_ELEMENT: &str = "appengine-web-app";
const APPLICATION_ELEMENT: &str = "application";
const VERSION_ELEMENT: &str = "version";

/// Identity fields carried by `appengine-web.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub project_id: Option<String>,
    pub project_version: Option<String>,
}

impl Descriptor {
    /// Extracts `<application>` and `<version>` from directly under the
    /// `<appengine-web-app>` root. Namespace prefixes are ignored.
    pub fn parse(xml: &str) -> Result<Self, DescriptorError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut descriptor = Descriptor::default();
        let mut open_elements: Vec<String> = Vec::new();
        let mut saw_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    saw_root = true;
                    let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                    open_elements.push(name);
                }
                Event::Empty(_) => {
                    saw_root = true;
                }
                Event::End(_) => {
                    open_elements.pop();
                }
                Event::Text(text) => {
                    let value = text.unescape()?;
                    descriptor.record(&open_elements, &value);
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    descriptor.record(&open_elements, &value);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(DescriptorError::Malformed {
                reason: "document has no root element".to_string(),
            });
        }
        if let Some(unclosed) = open_elements.last() {
            return Err(DescriptorError::Malformed {
                reason: format!("element <{unclosed}> is never closed"),
            });
        }

        Ok(descriptor)
    }

    fn record(&mut self, open_elements: &[String], value: &str) {
        let [root, element] = open_elements else {
            return;
        };
        if root != ROOT_ELEMENT {
            return;
        }

        let slot = match element.as_str() {
            APPLICATION_ELEMENT => &mut self.project_id,
            VERSION_ELEMENT => &mut self.project_version,
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(value);
    }
}
