use model::{
    core::schema::Schema,
    records::row::{RecordBuilder, RowData},
};

/// Starts the output record for an annotation transformer: every field of
/// `input` is copied as-is, and the record is named after `schema` when it
/// describes a record.
pub fn output_record_builder(input: &RowData, schema: &Schema) -> RecordBuilder {
    let entity = schema
        .non_nullable()
        .as_record()
        .map(|record| record.name.as_str())
        .unwrap_or(input.entity.as_str());

    RecordBuilder::from_fields(entity, input.field_values.clone())
}
