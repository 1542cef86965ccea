//! Operation catalog: the fixed dispatch table from operation name to lookup.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{ProviderClient, ResultMap};
use crate::error::ProviderError;

/// Every operation the servers expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PdbInfo,
    ChemblInfo,
    PubchemInfo,
    DrugbankInfo,
    UniprotInfo,
    GeneInfo,
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::PdbInfo,
        Self::ChemblInfo,
        Self::PubchemInfo,
        Self::DrugbankInfo,
        Self::UniprotInfo,
        Self::GeneInfo,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PdbInfo => "get_pdb_info",
            Self::ChemblInfo => "get_chembl_info",
            Self::PubchemInfo => "get_pubchem_info",
            Self::DrugbankInfo => "get_drugbank_info",
            Self::UniprotInfo => "get_uniprot_info",
            Self::GeneInfo => "get_gene_info",
        }
    }

    /// Name of the single string parameter the operation takes.
    #[must_use]
    pub const fn parameter(self) -> &'static str {
        match self {
            Self::PdbInfo => "pdb_id",
            Self::ChemblInfo => "chembl_id",
            Self::PubchemInfo => "pubchem_id",
            Self::DrugbankInfo => "drugbank_id",
            Self::UniprotInfo => "uniprot_id",
            Self::GeneInfo => "gene_symbol",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PdbInfo => {
                "Fetch title, experimental method, resolution, and release date for a PDB ID (e.g. '7WRL')."
            }
            Self::ChemblInfo => {
                "Fetch preferred name, molecular weight, SMILES, mechanism of action, and target for a ChEMBL ID (e.g. 'CHEMBL25')."
            }
            Self::PubchemInfo => {
                "Fetch name, molecular weight, and SMILES for a PubChem CID (e.g. '2244')."
            }
            Self::DrugbankInfo => {
                "Fetch name, description, CAS number, ATC codes, and groups for a DrugBank ID (e.g. 'DB00001')."
            }
            Self::UniprotInfo => {
                "Fetch accession, protein name, function, and binding sites for a UniProt ID (e.g. 'P69905')."
            }
            Self::GeneInfo => {
                "Fetch the HGNC record for an approved human gene symbol (e.g. 'TP53')."
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Public description of a registered operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub parameter: &'static str,
    pub description: &'static str,
}

impl From<Operation> for OperationInfo {
    fn from(operation: Operation) -> Self {
        Self {
            name: operation.name(),
            parameter: operation.parameter(),
            description: operation.description(),
        }
    }
}

#[derive(Debug)]
pub enum DispatchError {
    UnknownOperation(String),
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },
    InvalidParameter {
        operation: &'static str,
        parameter: &'static str,
    },
    Provider(ProviderError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "operation not found: {name}"),
            Self::MissingParameter {
                operation,
                parameter,
            } => write!(f, "{operation} requires parameter `{parameter}`"),
            Self::InvalidParameter {
                operation,
                parameter,
            } => write!(f, "{operation} parameter `{parameter}` must be a string"),
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for DispatchError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

/// Dispatch table built once at startup and shared read-only between calls.
#[derive(Clone)]
pub struct Catalog {
    client: ProviderClient,
    operations: HashMap<&'static str, Operation>,
}

impl Catalog {
    #[must_use]
    pub fn new(client: ProviderClient) -> Self {
        let operations = Operation::ALL
            .into_iter()
            .map(|operation| (operation.name(), operation))
            .collect();
        Self { client, operations }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Operation> {
        self.operations.get(name).copied()
    }

    /// Registered operations in a stable order.
    #[must_use]
    pub fn operations(&self) -> Vec<OperationInfo> {
        Operation::ALL
            .into_iter()
            .filter(|operation| self.operations.contains_key(operation.name()))
            .map(OperationInfo::from)
            .collect()
    }

    /// Runs one operation against its upstream and renders the result mapping.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or an undecodable body.
    pub async fn invoke(
        &self,
        operation: Operation,
        argument: &str,
    ) -> Result<ResultMap, ProviderError> {
        debug!(%operation, argument, "invoking operation");
        let client = &self.client;
        match operation {
            Operation::PdbInfo => client.pdb_entry(argument).await?.into_result_map(),
            Operation::ChemblInfo => client.chembl_compound(argument).await?.into_result_map(),
            Operation::PubchemInfo => client.pubchem_compound(argument).await?.into_result_map(),
            Operation::DrugbankInfo => client.drugbank_drug(argument).await?.into_result_map(),
            Operation::UniprotInfo => client.uniprot_entry(argument).await?.into_result_map(),
            Operation::GeneInfo => client.gene_record(argument).await?.into_result_map(),
        }
    }

    /// Routes a call by operation name with a mapping of named parameters.
    ///
    /// Unknown names fail before any upstream request is made.
    ///
    /// # Errors
    /// Returns `DispatchError` for unknown operations, missing or non-string
    /// parameters, and provider faults.
    pub async fn call(
        &self,
        name: &str,
        params: &Map<String, Value>,
    ) -> Result<ResultMap, DispatchError> {
        let operation = self
            .lookup(name)
            .ok_or_else(|| DispatchError::UnknownOperation(name.to_string()))?;
        let argument = match params.get(operation.parameter()) {
            None | Some(Value::Null) => {
                return Err(DispatchError::MissingParameter {
                    operation: operation.name(),
                    parameter: operation.parameter(),
                });
            }
            Some(Value::String(argument)) => argument,
            Some(_) => {
                return Err(DispatchError::InvalidParameter {
                    operation: operation.name(),
                    parameter: operation.parameter(),
                });
            }
        };
        Ok(self.invoke(operation, argument).await?)
    }
}
