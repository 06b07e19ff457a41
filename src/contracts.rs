//! ABI bindings for the marketplace contracts.

use alloy::primitives::Address;
use alloy::sol;
use alloy::sol_types::SolConstructor;

/// Marketplace holding listings and escrow.
pub const NFT_MARKETPLACE: &str = "NFTMarketplace";
/// ERC-721 collection.
pub const UIT_TOKEN_721: &str = "UITToken721";
/// ERC-1155 collection.
pub const UIT_TOKEN_1155: &str = "UITToken1155";
/// On-chain signature checker.
pub const VERIFY_SIGNATURE: &str = "VerifySignature";

/// Token symbols passed to the collection constructors.
pub const UIT_TOKEN_721_SYMBOL: &str = "U721";
pub const UIT_TOKEN_1155_SYMBOL: &str = "U1155";

sol! {
    contract UITToken721 {
        constructor(string name, string symbol, address marketplace);
    }

    contract UITToken1155 {
        constructor(string name, string symbol, address marketplace);
    }

    #[sol(rpc)]
    interface IVerifySignature {
        function getMessageHash(string memory _message) external pure returns (bytes32);
        function getEthSignedMessageHash(bytes32 _messageHash) external pure returns (bytes32);
        function verify(address _signer, string memory _message, bytes memory _signature) external pure returns (bool);
    }
}

/// Constructor arguments for `UITToken721`, bound to a marketplace.
pub fn erc721_constructor_args(marketplace: Address) -> Vec<u8> {
    UITToken721::constructorCall {
        name: UIT_TOKEN_721.to_string(),
        symbol: UIT_TOKEN_721_SYMBOL.to_string(),
        marketplace,
    }
    .abi_encode()
}

/// Constructor arguments for `UITToken1155`, bound to a marketplace.
pub fn erc1155_constructor_args(marketplace: Address) -> Vec<u8> {
    UITToken1155::constructorCall {
        name: UIT_TOKEN_1155.to_string(),
        symbol: UIT_TOKEN_1155_SYMBOL.to_string(),
        marketplace,
    }
    .abi_encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use alloy::sol_types::SolValue;

    #[test]
    fn test_erc721_args_encoding() {
        let marketplace = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let encoded = erc721_constructor_args(marketplace);

        let expected = (
            UIT_TOKEN_721.to_string(),
            UIT_TOKEN_721_SYMBOL.to_string(),
            marketplace,
        )
            .abi_encode_params();
        assert_eq!(encoded, expected);

        // Three head words, then two dynamic strings
        assert_eq!(&encoded[64 + 12..96], marketplace.as_slice());
    }

    #[test]
    fn test_erc1155_args_decode() {
        let marketplace = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
        let encoded = erc1155_constructor_args(marketplace);

        let (name, symbol, addr) =
            <(String, String, Address)>::abi_decode_params(&encoded).unwrap();
        assert_eq!(name, "UITToken1155");
        assert_eq!(symbol, "U1155");
        assert_eq!(addr, marketplace);
    }
}
