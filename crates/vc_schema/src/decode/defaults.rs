use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::cache::FieldSpec;
use crate::convert::parse_primitive;
use crate::decode::Decoder;
use crate::decode::touched::Touched;
use crate::error::{ConfigError, MultiError, SchemaError};
use crate::ops::{ReflectMut, Struct};
use crate::path::SEPARATOR;

/// Separates the items of a list default, e.g. `default:a|b`.
const LIST_DEFAULT_SEPARATOR: char = '|';

impl Decoder {
    /// Applies `default:` options to the untouched zero fields of `record`
    /// and of the records nested in it.
    pub(super) fn apply_defaults(
        &self,
        record: &mut dyn Struct,
        prefix: &str,
        touched: &Touched,
        errors: &mut MultiError,
    ) {
        let Some(info) = record.reflect_info().as_struct() else {
            return;
        };
        let tree = self.cache.tree(info, &self.options.tag);

        for spec in tree.fields() {
            let canonical = join(prefix, spec.alias());
            let Some(field) = record.field_at_mut(spec.index()) else {
                continue;
            };
            let options = spec.options();

            match options.default_value().filter(|raw| !raw.is_empty()) {
                Some(_) if options.required() => {
                    errors.insert_first(&canonical, ConfigError::RequiredWithDefault.into());
                }
                Some(raw) => {
                    if touched.is_touched(&canonical) || !field.is_zero() {
                        continue;
                    }
                    if let Err(err) = set_default(field, raw, spec) {
                        errors.insert_first(&canonical, err);
                    }
                }
                None => {
                    if let Some(inner) = allocated_record(field.as_reflect_mut()) {
                        self.apply_defaults(inner, &canonical, touched, errors);
                    }
                }
            }
        }
    }
}

/// Parses `raw` into `field`.
///
/// A scalar default that does not parse is ignored; a list default must
/// parse entirely.
fn set_default(field: &mut dyn Reflect, raw: &str, spec: &FieldSpec) -> Result<(), SchemaError> {
    let info = field.reflect_info().pointee();

    if let Some(scalar) = info.as_scalar() {
        let primitive = match parse_primitive(scalar.kind(), raw) {
            Ok(primitive) => primitive,
            Err(cause) => {
                log::debug!("ignoring default {raw:?} of `{}`: {cause}", spec.canonical());
                return Ok(());
            }
        };
        if let ReflectMut::Scalar(target) = field.pointee_mut().reflect_mut() {
            let _ = target.set_primitive(primitive);
        }
        return Ok(());
    }

    let Some(list) = info.as_list() else {
        return Err(ConfigError::UnsupportedDefault.into());
    };
    let item_info = list.item_info();
    let Some(kind) = item_info.pointee().as_scalar().map(|scalar| scalar.kind()) else {
        return Err(ConfigError::UnsupportedDefault.into());
    };

    let mut items: Vec<Box<dyn Reflect>> = Vec::new();
    for piece in raw.split(LIST_DEFAULT_SEPARATOR) {
        let incompatible = || ConfigError::IncompatibleDefault {
            value: String::from(piece),
            field: spec.field().name(),
        };
        let primitive = parse_primitive(kind, piece).map_err(|_| incompatible())?;

        let mut item = item_info.new_default();
        match item.pointee_mut().reflect_mut() {
            ReflectMut::Scalar(target) => {
                target.set_primitive(primitive).map_err(|_| incompatible())?;
            }
            _ => return Err(incompatible().into()),
        }
        items.push(item);
    }

    if let ReflectMut::List(target) = field.pointee_mut().reflect_mut() {
        target.clear();
        for item in items {
            if target.push(item).is_err() {
                return Err(ConfigError::UnsupportedDefault.into());
            }
        }
    }
    Ok(())
}

/// The record held by `value` directly or through allocated optionals.
fn allocated_record(value: &mut dyn Reflect) -> Option<&mut dyn Struct> {
    match value.reflect_mut() {
        ReflectMut::Struct(record) => Some(record),
        ReflectMut::Optional(optional) => optional.value_mut().and_then(allocated_record),
        _ => None,
    }
}

pub(super) fn join(prefix: &str, alias: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + alias.len() + 1);
    if !prefix.is_empty() {
        path.push_str(prefix);
        path.push(SEPARATOR);
    }
    path.push_str(alias);
    path
}
