use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};

sol! {
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }
}

pub fn encode_balance_of(owner: Address) -> Bytes {
    let call = IERC20::balanceOfCall { owner };
    Bytes::from(call.abi_encode())
}

pub fn encode_decimals() -> Bytes {
    Bytes::from(IERC20::decimalsCall {}.abi_encode())
}

pub fn encode_symbol() -> Bytes {
    Bytes::from(IERC20::symbolCall {}.abi_encode())
}

pub fn decode_balance_of(data: &Bytes) -> Result<U256, alloy::sol_types::Error> {
    IERC20::balanceOfCall::abi_decode_returns(data)
}

pub fn decode_decimals(data: &Bytes) -> Result<u8, alloy::sol_types::Error> {
    IERC20::decimalsCall::abi_decode_returns(data)
}

pub fn decode_symbol(data: &Bytes) -> Result<String, alloy::sol_types::Error> {
    IERC20::symbolCall::abi_decode_returns(data)
}
