//! # ATM Contract ABI
//!
//! Loads the contract's ABI descriptor (a Hardhat artifact or a bare ABI array)
//! and encodes the three calls the client makes:
//!
//! | Call                  | Kind  | Returns   |
//! |-----------------------|-------|-----------|
//! | `getBalance()`        | view  | `uint256` |
//! | `deposit(uint256)`    | write | -         |
//! | `withdraw(uint256)`   | write | -         |
//!
//! Calldata is the 4-byte Keccak-256 selector of the canonical signature
//! followed by one 32-byte big-endian word per argument.
//!
//! ## Example
//!
//! ```rust
//! use lib_evm::abi::{AbiDescriptor, AtmCall, AtmSelectors};
//!
//! let abi = AbiDescriptor::atm_default().unwrap();
//! let selectors = AtmSelectors::from_abi(&abi).unwrap();
//! let calldata = AtmCall::Deposit(1).encode(&selectors);
//! assert_eq!(&calldata[..4], &[0xb6, 0xb5, 0x5f, 0x25]);
//! assert_eq!(calldata.len(), 36);
//! ```

use serde::Deserialize;
use thiserror::Error;
use tiny_keccak::{Hasher, Keccak};

/// Hardhat artifact for the ATM (`Assessment`) contract, trimmed to its ABI.
pub const ATM_ABI_JSON: &str = r#"{
  "contractName": "Assessment",
  "sourceName": "contracts/Assessment.sol",
  "abi": [
    {
      "inputs": [{ "internalType": "uint256", "name": "initBalance", "type": "uint256" }],
      "stateMutability": "payable",
      "type": "constructor"
    },
    {
      "inputs": [
        { "internalType": "uint256", "name": "balance", "type": "uint256" },
        { "internalType": "uint256", "name": "withdrawAmount", "type": "uint256" }
      ],
      "name": "InsufficientBalance",
      "type": "error"
    },
    {
      "anonymous": false,
      "inputs": [{ "indexed": false, "internalType": "uint256", "name": "amount", "type": "uint256" }],
      "name": "Deposit",
      "type": "event"
    },
    {
      "anonymous": false,
      "inputs": [{ "indexed": false, "internalType": "uint256", "name": "amount", "type": "uint256" }],
      "name": "Withdraw",
      "type": "event"
    },
    {
      "inputs": [{ "internalType": "uint256", "name": "_amount", "type": "uint256" }],
      "name": "deposit",
      "outputs": [],
      "stateMutability": "payable",
      "type": "function"
    },
    {
      "inputs": [],
      "name": "getBalance",
      "outputs": [{ "internalType": "uint256", "name": "", "type": "uint256" }],
      "stateMutability": "view",
      "type": "function"
    },
    {
      "inputs": [],
      "name": "owner",
      "outputs": [{ "internalType": "address payable", "name": "", "type": "address" }],
      "stateMutability": "view",
      "type": "function"
    },
    {
      "inputs": [{ "internalType": "uint256", "name": "_withdrawAmount", "type": "uint256" }],
      "name": "withdraw",
      "outputs": [],
      "stateMutability": "nonpayable",
      "type": "function"
    }
  ]
}"#;

/// ABI loading and decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("Failed to parse ABI JSON: {0}")]
    ParseError(String),

    #[error("ABI has no function named `{0}`")]
    MissingFunction(String),

    #[error("ABI signature mismatch: expected `{expected}`, found `{found}`")]
    SignatureMismatch { expected: String, found: String },

    #[error("Return data too short: {0} bytes")]
    ShortData(usize),

    #[error("uint256 value does not fit in 64 bits")]
    Overflow,
}

#[derive(Debug, Clone, Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
}

/// Accept both a full Hardhat artifact and the bare `abi` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum AbiSource {
    Artifact { abi: Vec<AbiEntry> },
    Bare(Vec<AbiEntry>),
}

/// A callable contract function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiFunction {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl AbiFunction {
    /// Canonical signature, e.g. `withdraw(uint256)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    pub fn selector(&self) -> [u8; 4] {
        selector(&self.signature())
    }
}

/// The contract's functions, as read from its ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiDescriptor {
    functions: Vec<AbiFunction>,
}

impl AbiDescriptor {
    /// Parse an artifact or ABI array. Constructors, events and errors are skipped.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let source: AbiSource =
            serde_json::from_str(json).map_err(|e| AbiError::ParseError(e.to_string()))?;

        let entries = match source {
            AbiSource::Artifact { abi } => abi,
            AbiSource::Bare(abi) => abi,
        };

        let functions = entries
            .into_iter()
            .filter(|entry| entry.kind == "function")
            .map(|entry| AbiFunction {
                name: entry.name,
                inputs: entry.inputs.into_iter().map(|p| p.kind).collect(),
                outputs: entry.outputs.into_iter().map(|p| p.kind).collect(),
            })
            .collect();

        Ok(Self { functions })
    }

    /// The ABI bundled with the client.
    pub fn atm_default() -> Result<Self, AbiError> {
        Self::from_json(ATM_ABI_JSON)
    }

    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn functions(&self) -> &[AbiFunction] {
        &self.functions
    }

    fn expect_function(&self, name: &str, inputs: &[&str], outputs: &[&str]) -> Result<&AbiFunction, AbiError> {
        let function = self
            .function(name)
            .ok_or_else(|| AbiError::MissingFunction(name.to_string()))?;

        if function.inputs != inputs || function.outputs != outputs {
            return Err(AbiError::SignatureMismatch {
                expected: format!("{}({}) -> ({})", name, inputs.join(","), outputs.join(",")),
                found: format!("{} -> ({})", function.signature(), function.outputs.join(",")),
            });
        }

        Ok(function)
    }
}

/// Selectors of the three ATM calls, checked against an ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtmSelectors {
    pub get_balance: [u8; 4],
    pub deposit: [u8; 4],
    pub withdraw: [u8; 4],
}

impl AtmSelectors {
    /// Fails if the ABI lacks one of the calls or declares it with other types.
    pub fn from_abi(abi: &AbiDescriptor) -> Result<Self, AbiError> {
        Ok(Self {
            get_balance: abi.expect_function("getBalance", &[], &["uint256"])?.selector(),
            deposit: abi.expect_function("deposit", &["uint256"], &[])?.selector(),
            withdraw: abi.expect_function("withdraw", &["uint256"], &[])?.selector(),
        })
    }
}

/// A call to the ATM contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmCall {
    GetBalance,
    Deposit(u64),
    Withdraw(u64),
}

impl AtmCall {
    pub fn encode(&self, selectors: &AtmSelectors) -> Vec<u8> {
        let (selector, argument) = match self {
            AtmCall::GetBalance => (selectors.get_balance, None),
            AtmCall::Deposit(amount) => (selectors.deposit, Some(*amount)),
            AtmCall::Withdraw(amount) => (selectors.withdraw, Some(*amount)),
        };

        let mut data = selector.to_vec();
        if let Some(amount) = argument {
            data.extend_from_slice(&encode_uint256(amount));
        }
        data
    }

    /// Recognize calldata produced by [`AtmCall::encode`].
    pub fn decode(data: &[u8], selectors: &AtmSelectors) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        let (head, args) = data.split_at(4);

        if head == selectors.get_balance && args.is_empty() {
            return Some(AtmCall::GetBalance);
        }

        let amount = decode_uint256(args).ok()?;
        if head == selectors.deposit {
            Some(AtmCall::Deposit(amount))
        } else if head == selectors.withdraw {
            Some(AtmCall::Withdraw(amount))
        } else {
            None
        }
    }
}

/// First four bytes of the Keccak-256 hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    [output[0], output[1], output[2], output[3]]
}

/// Left-pad a value into a 32-byte ABI word.
pub fn encode_uint256(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Read the first ABI word of `data` as a `uint256` that must fit in a `u64`.
pub fn decode_uint256(data: &[u8]) -> Result<u64, AbiError> {
    if data.len() < 32 {
        return Err(AbiError::ShortData(data.len()));
    }
    if data[..24].iter().any(|b| *b != 0) {
        return Err(AbiError::Overflow);
    }

    let mut low = [0u8; 8];
    low.copy_from_slice(&data[24..32]);
    Ok(u64::from_be_bytes(low))
}
