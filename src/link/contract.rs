//! Call shapes of the link module contract and the ERC-20 metadata it reads.

use alloy::primitives::{Address, Bytes, Signature, B256, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::link::types::{LinkError, LinkRecord, LinkResult};

sol! {
    /// Safe module holding link funds.
    #[derive(Debug)]
    interface ISafe2LinkModule {
        function getLinkCount() external view returns (uint256 count);

        function getLink(uint256 index)
            external
            view
            returns (address token, uint256 amount, address claimAuthority, bool claimed);

        function createLink(address token, uint256 amount, address claimAuthority) external;

        function claimLink(
            uint256 index,
            address claimant,
            bytes32 hashedDigest,
            bytes signature,
            address manager
        ) external;
    }

    #[derive(Debug)]
    interface IERC20Metadata {
        function decimals() external view returns (uint8);
    }
}

pub fn encode_get_link_count() -> Bytes {
    ISafe2LinkModule::getLinkCountCall {}.abi_encode().into()
}

pub fn decode_link_count(data: &[u8]) -> LinkResult<U256> {
    ISafe2LinkModule::getLinkCountCall::abi_decode_returns(data)
        .map_err(|e| LinkError::Abi(format!("getLinkCount: {}", e)))
}

pub fn encode_get_link(index: U256) -> Bytes {
    ISafe2LinkModule::getLinkCall { index }.abi_encode().into()
}

pub fn decode_link(index: U256, data: &[u8]) -> LinkResult<LinkRecord> {
    let ret = ISafe2LinkModule::getLinkCall::abi_decode_returns(data)
        .map_err(|e| LinkError::Abi(format!("getLink: {}", e)))?;
    Ok(LinkRecord {
        index,
        token: ret.token,
        amount: ret.amount,
        claim_authority: ret.claimAuthority,
        claimed: ret.claimed,
    })
}

pub fn encode_create_link(token: Address, amount: U256, claim_authority: Address) -> Bytes {
    ISafe2LinkModule::createLinkCall {
        token,
        amount,
        claimAuthority: claim_authority,
    }
    .abi_encode()
    .into()
}

pub fn encode_claim_link(
    index: U256,
    claimant: Address,
    hashed_digest: B256,
    signature: &Signature,
    manager: Address,
) -> Bytes {
    ISafe2LinkModule::claimLinkCall {
        index,
        claimant,
        hashedDigest: hashed_digest,
        signature: Bytes::copy_from_slice(&signature.as_bytes()),
        manager,
    }
    .abi_encode()
    .into()
}

pub fn encode_decimals() -> Bytes {
    IERC20Metadata::decimalsCall {}.abi_encode().into()
}

pub fn decode_decimals(data: &[u8]) -> LinkResult<u8> {
    IERC20Metadata::decimalsCall::abi_decode_returns(data)
        .map_err(|e| LinkError::Abi(format!("decimals: {}", e)))
}
