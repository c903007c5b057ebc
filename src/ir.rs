use crate::fields::{FieldNames, LogicalField};
use crate::infer::{FieldType, infer_type};
use crate::record::Record;

/// The only header treated as a primary key.
pub const PRIMARY_KEY_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    Tables,
    Pk,
    /// Key and reference fields. Flat sheets carry no references, so this
    /// currently shows the same lines as `Pk`.
    PkFk,
    #[default]
    All,
}

impl DetailLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tables" => Some(Self::Tables),
            "pk" => Some(Self::Pk),
            "pk_fk" => Some(Self::PkFk),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphIR {
    pub entities: Vec<EntityIR>,
}

/// One record seen as a diagram entity.
#[derive(Debug, Clone)]
pub struct EntityIR {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnIR>,
}

#[derive(Debug, Clone)]
pub struct ColumnIR {
    pub name: String,
    pub typ: FieldType,
    pub is_pk: bool,
    pub is_fk: bool,
}

impl ColumnIR {
    /// `"<name>: <type>[ (PK)][ (FK)]"`
    pub fn line(&self) -> String {
        let mut line = format!("{}: {}", self.name, self.typ);
        if self.is_pk {
            line.push_str(" (PK)");
        }
        if self.is_fk {
            line.push_str(" (FK)");
        }
        line
    }
}

impl EntityIR {
    pub fn has_pk(&self) -> bool {
        self.columns.iter().any(|c| c.is_pk)
    }

    pub fn has_fk(&self) -> bool {
        self.columns.iter().any(|c| c.is_fk)
    }

    /// Entity name on the first line, one line per column after it.
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        for col in &self.columns {
            label.push('\n');
            label.push_str(&col.line());
        }
        label
    }
}

impl GraphIR {
    /// One entity per record, ids `"1"`, `"2"`, ... in record order.
    pub fn from_records(records: &[Record], fields: &FieldNames, detail: DetailLevel) -> Self {
        let entities = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let id = (i + 1).to_string();
                let name = fields
                    .lookup(record, LogicalField::Name)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Record {id}"));

                let columns = record
                    .iter()
                    .filter_map(|(key, value)| {
                        let is_pk = key == PRIMARY_KEY_FIELD;
                        // No relationship information exists in a flat sheet.
                        let is_fk = false;

                        let include = match detail {
                            DetailLevel::Tables => false,
                            DetailLevel::Pk => is_pk,
                            DetailLevel::PkFk => is_pk || is_fk,
                            DetailLevel::All => true,
                        };

                        include.then(|| ColumnIR {
                            name: key.clone(),
                            typ: infer_type(Some(value)),
                            is_pk,
                            is_fk,
                        })
                    })
                    .collect();

                EntityIR { id, name, columns }
            })
            .collect();

        GraphIR { entities }
    }
}
