//! Opaque records from the endorsement/ordering layer.
//!
//! Proposal responses, endorsements and chaincode events belong to an external
//! system. We carry them next to a transaction without looking inside: each is
//! stored as an [`OpaqueRecord`] holding a kind tag and CBOR bytes. The
//! structs below only give callers a typed shape to wrap and open.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::transaction::Transaction;
use crate::types::Timestamp;

/// A message type owned by the external endorsement/ordering system.
pub trait OpaqueMessage: Serialize + DeserializeOwned {
    /// Tag stored alongside the encoded body.
    const KIND: &'static str;
}

/// Outcome of a proposal as reported by an endorser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Bytes,
}

/// An endorser's identity and its signature over a proposal response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    pub endorser: Bytes,
    pub signature: Bytes,
}

/// An endorser's reply to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub version: i32,
    pub timestamp: Option<Timestamp>,
    pub response: Option<Response>,
    /// Encoded [`ProposalResponsePayload`].
    pub payload: Bytes,
    pub endorsement: Option<Endorsement>,
    pub interest: Option<ChaincodeInterest>,
}

/// The signed part of a proposal response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponsePayload {
    pub proposal_hash: Bytes,
    /// Type-specific; for chaincode an encoded action.
    pub extension: Bytes,
}

/// Chaincodes an endorsement depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInterest {
    pub chaincodes: Vec<ChaincodeCall>,
}

/// One chaincode invocation within a [`ChaincodeInterest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeCall {
    pub name: String,
    pub collection_names: Vec<String>,
    pub no_private_reads: bool,
    pub no_public_writes: bool,
    /// Encoded signature policy envelopes, kept opaque.
    pub key_policies: Vec<Bytes>,
    pub disregard_namespace_policy: bool,
}

/// An event emitted by chaincode while a transaction executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeEvent {
    pub chaincode_id: String,
    pub tx_id: String,
    pub event_name: String,
    pub payload: Bytes,
}

impl OpaqueMessage for Response {
    const KIND: &'static str = "response";
}

impl OpaqueMessage for Endorsement {
    const KIND: &'static str = "endorsement";
}

impl OpaqueMessage for ProposalResponse {
    const KIND: &'static str = "proposal_response";
}

impl OpaqueMessage for ProposalResponsePayload {
    const KIND: &'static str = "proposal_response_payload";
}

impl OpaqueMessage for ChaincodeInterest {
    const KIND: &'static str = "chaincode_interest";
}

impl OpaqueMessage for ChaincodeEvent {
    const KIND: &'static str = "chaincode_event";
}

/// A pass-through value: a kind tag and an encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueRecord {
    pub kind: String,
    pub body: Bytes,
}

impl OpaqueRecord {
    /// Encode a message into an opaque record.
    pub fn wrap<M: OpaqueMessage>(message: &M) -> Result<Self, CoreError> {
        let mut body = Vec::new();
        ciborium::into_writer(message, &mut body)
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(Self {
            kind: M::KIND.to_string(),
            body: body.into(),
        })
    }

    /// Decode the record back into the message type it was wrapped from.
    pub fn open<M: OpaqueMessage>(&self) -> Result<M, CoreError> {
        if self.kind != M::KIND {
            return Err(CoreError::DecodingError(format!(
                "record kind {:?} is not {:?}",
                self.kind,
                M::KIND
            )));
        }
        ciborium::from_reader(&self.body[..])
            .map_err(|e| CoreError::DecodingError(e.to_string()))
    }

    pub fn is<M: OpaqueMessage>(&self) -> bool {
        self.kind == M::KIND
    }
}

/// A transaction together with records attached by the outer system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub transaction: Transaction,
    pub attachments: Vec<OpaqueRecord>,
}

impl Envelope {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            attachments: Vec::new(),
        }
    }

    /// Attach a record.
    pub fn attach(mut self, record: OpaqueRecord) -> Self {
        self.attachments.push(record);
        self
    }

    /// All attachments of the given message type.
    pub fn attachments_of<M: OpaqueMessage>(&self) -> impl Iterator<Item = &OpaqueRecord> {
        self.attachments.iter().filter(|r| r.is::<M>())
    }

    /// Encode the envelope with `ciborium`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Decode an envelope produced by [`Envelope::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}
