mod record_data;
mod record_type;
mod resource_record;

pub use record_data::RecordData;
pub use record_type::RecordType;
pub use resource_record::ResourceRecord;
