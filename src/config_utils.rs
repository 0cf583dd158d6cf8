use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use xml::attribute::OwnedAttribute;
use xml::reader::EventReader;

use super::error::{OdError, Result};


pub fn xml_parser_from_path(path: &Path) -> Result<EventReader<BufReader<File>>> {
    let file = File::open(path)?;
    let file = BufReader::new(file);
    Ok(EventReader::new(file))
}

pub fn get_xml_attribute_value(attributes: &[OwnedAttribute], attr_name: &str)
                               -> Option<String> {
    attributes.iter()
              .find(|attr| attr.name.local_name == attr_name)
              .map(|attr| attr.value.clone())
}

/// Like `get_xml_attribute_value`, but parses the value and treats a bad value as an error.
/// A missing attribute is still `None`.
pub fn parse_xml_attribute<T: FromStr>(attributes: &[OwnedAttribute], attr_name: &str)
                                       -> Result<Option<T>> {
    match get_xml_attribute_value(attributes, attr_name) {
        Some(value) => parse_value(attr_name, &value).map(Some),
        None => Ok(None),
    }
}

pub fn parse_value<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| OdError::Parse {
        field: String::from(field),
        value: String::from(value),
    })
}

pub fn str_to_absolute_path(path_str: &str, default_base_dir: &Path) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        [default_base_dir, Path::new(&path)].iter().collect()
    }
}
