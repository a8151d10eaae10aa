use super::{
    error::HiveError,
    helper::join_path,
    store::{HiveKey, HiveStore, HiveValue, ValueData},
};
use log::error;
use notatin::{
    cell_key_node::CellKeyNode, cell_value::CellValue, parser::Parser,
    parser_builder::ParserBuilder,
};
use std::{cell::RefCell, path::Path};

/// Raw hive file opened with `notatin`
pub struct RawHive {
    parser: RefCell<Parser>,
}

impl RawHive {
    pub fn open(path: &Path) -> Result<RawHive, HiveError> {
        let parser_result = ParserBuilder::from_path(path.to_path_buf())
            .recover_deleted(false)
            .build();
        let parser = match parser_result {
            Ok(result) => result,
            Err(err) => {
                error!("[hive] Could not open raw hive {path:?}: {err:?}");
                return Err(HiveError::OpenHive);
            }
        };

        Ok(RawHive {
            parser: RefCell::new(parser),
        })
    }

    fn node(&self, path: &str) -> Result<Option<CellKeyNode>, HiveError> {
        let mut parser = self.parser.borrow_mut();
        match parser.get_key(path.trim_matches('\\'), false) {
            Ok(result) => Ok(result),
            Err(err) => {
                error!("[hive] Could not read key {path}: {err:?}");
                Err(HiveError::ReadKey)
            }
        }
    }
}

fn to_hive_key(node: &CellKeyNode, path: String) -> HiveKey {
    let values = node
        .value_iter()
        .map(|value| HiveValue {
            name: value.get_pretty_name(),
            data: to_value_data(value.get_content().0),
        })
        .collect();

    HiveKey {
        name: node.key_name.clone(),
        path,
        last_written: Some(node.last_key_written_date_and_time()),
        values,
    }
}

fn to_value_data(content: CellValue) -> ValueData {
    match content {
        CellValue::String(text) => ValueData::String(text),
        CellValue::MultiString(entries) => ValueData::MultiString(entries),
        CellValue::U32(number) => ValueData::Dword(number),
        CellValue::I32(number) => ValueData::Dword(number as u32),
        CellValue::U64(number) => ValueData::Qword(number),
        CellValue::I64(number) => ValueData::Qword(number as u64),
        CellValue::Binary(bytes) => ValueData::Binary(bytes),
        _ => ValueData::None,
    }
}

impl HiveStore for RawHive {
    fn open_key(&self, path: &str) -> Result<Option<HiveKey>, HiveError> {
        let node = self.node(path)?;
        Ok(node.map(|key| to_hive_key(&key, path.trim_matches('\\').to_string())))
    }

    fn subkeys(&self, path: &str) -> Result<Vec<HiveKey>, HiveError> {
        let mut node = match self.node(path)? {
            Some(result) => result,
            None => return Ok(Vec::new()),
        };

        let mut parser = self.parser.borrow_mut();
        let children = node.read_sub_keys(&mut parser);
        let parent = path.trim_matches('\\');
        Ok(children
            .iter()
            .map(|child| to_hive_key(child, join_path(parent, &child.key_name)))
            .collect())
    }
}
