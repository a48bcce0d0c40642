use crate::attachment;
use crate::decode::Decoder;
use crate::decode::defaults::join;
use crate::decode::touched::Touched;
use crate::error::{MultiError, SchemaError};
use crate::ops::{ReflectRef, Struct};

impl Decoder {
    /// Reports every `required` field of `record` that received no usable
    /// value, recursing into direct and embedded records.
    pub(super) fn check_required(
        &self,
        record: &dyn Struct,
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

            if spec.options().required()
                && !attachment::is_attachment_type(spec.field().type_info())
                && !touched.is_filled(&canonical)
            {
                let err = SchemaError::EmptyField {
                    key: canonical.clone(),
                };
                errors.insert_first(&canonical, err);
            }

            let Some(field) = record.field_at(spec.index()) else {
                continue;
            };
            if let ReflectRef::Struct(inner) = field.as_reflect().reflect_ref() {
                self.check_required(inner, &canonical, touched, errors);
            }
        }
    }
}
