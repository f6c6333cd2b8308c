//! Result-code descriptions.
//!
//! Keys are the XDR result-code names as stellar-xdr spells them
//! (e.g. `PaymentUnderfunded`). Codes absent from the table render as
//! `Error: <code>` rather than failing classification.

/// One row of the lookup table.
#[derive(Debug, Clone, Copy)]
pub struct CodeInfo {
    pub code: &'static str,
    pub meaning: &'static str,
    pub remediation: Option<&'static str>,
}

pub fn lookup(code: &str) -> Option<&'static CodeInfo> {
    RESULT_CODES.iter().find(|info| info.code == code)
}

/// Human meaning for a code; `Error: <code>` when unmapped.
pub fn describe(code: &str) -> String {
    match lookup(code) {
        Some(info) => info.meaning.to_string(),
        None => format!("Error: {}", code),
    }
}

pub fn remediation(code: &str) -> Option<String> {
    lookup(code)
        .and_then(|info| info.remediation)
        .map(str::to_string)
}

macro_rules! code {
    ($code:literal, $meaning:literal) => {
        CodeInfo {
            code: $code,
            meaning: $meaning,
            remediation: None,
        }
    };
    ($code:literal, $meaning:literal, $fix:literal) => {
        CodeInfo {
            code: $code,
            meaning: $meaning,
            remediation: Some($fix),
        }
    };
}

pub const RESULT_CODES: &[CodeInfo] = &[
    // Transaction-level codes.
    code!("TxSuccess", "Transaction succeeded"),
    code!("TxFailed", "One or more operations failed"),
    code!("TxFeeBumpInnerSuccess", "Fee bump succeeded; inner transaction applied"),
    code!(
        "TxFeeBumpInnerFailed",
        "Fee bump applied but the inner transaction failed",
        "Inspect the inner transaction's layers for the root cause"
    ),
    code!("TxTooEarly", "Submitted before the validity window opened", "Wait for minTime or resubmit without time bounds"),
    code!("TxTooLate", "Validity window had already closed", "Rebuild the transaction with fresh time bounds"),
    code!("TxMissingOperation", "Transaction carries no operations"),
    code!("TxBadSeq", "Sequence number did not match the source account", "Refetch the account sequence and rebuild"),
    code!("TxBadAuth", "Too few valid signatures or wrong network", "Check signers and the network passphrase"),
    code!("TxInsufficientBalance", "Source balance below the reserve after fees", "Fund the source account"),
    code!("TxNoAccount", "Source account does not exist", "Create and fund the source account first"),
    code!("TxInsufficientFee", "Fee below the current network minimum", "Raise the fee or fee-bump the transaction"),
    code!("TxBadAuthExtra", "Unused signatures attached"),
    code!("TxInternalError", "Unknown error inside the validator"),
    code!("TxNotSupported", "Transaction shape not supported by this protocol version"),
    code!("TxBadSponsorship", "Sponsorship chain is malformed"),
    code!("TxBadMinSeqAgeOrGap", "Minimum sequence age or gap precondition unmet"),
    code!("TxMalformed", "Transaction envelope is malformed"),
    code!(
        "TxSorobanInvalid",
        "Soroban-specific validation failed",
        "Re-simulate to refresh the transaction's resource declaration"
    ),
    // Operation envelope-level codes.
    code!("OpInner", "Operation-specific result attached"),
    code!("OpBadAuth", "Missing or invalid signature for this operation", "Add the required signer"),
    code!("OpNoAccount", "Operation source account does not exist"),
    code!("OpNotSupported", "Operation not supported by this protocol version"),
    code!("OpTooManySubentries", "Account would exceed the subentry limit"),
    code!("OpExceededWorkLimit", "Operation exceeded the network work limit"),
    code!("OpTooManySponsoring", "Account sponsors too many entries"),
    // Create account.
    code!("CreateAccountMalformed", "Destination address is malformed"),
    code!("CreateAccountUnderfunded", "Source cannot cover the starting balance", "Lower the starting balance or fund the source"),
    code!("CreateAccountLowReserve", "Starting balance below the base reserve", "Start the account with at least the base reserve"),
    code!("CreateAccountAlreadyExist", "Destination account already exists"),
    // Payment.
    code!("PaymentMalformed", "Payment operation is malformed"),
    code!("PaymentUnderfunded", "Source balance cannot cover the amount", "Reduce the amount or fund the source account"),
    code!("PaymentSrcNoTrust", "Source holds no trustline for the asset"),
    code!("PaymentSrcNotAuthorized", "Issuer has not authorized the source for this asset"),
    code!("PaymentNoDestination", "Destination account does not exist", "Create the destination account first"),
    code!("PaymentNoTrust", "Destination holds no trustline for the asset", "Have the destination add a trustline"),
    code!("PaymentNotAuthorized", "Issuer has not authorized the destination"),
    code!("PaymentLineFull", "Destination trustline limit would be exceeded"),
    code!("PaymentNoIssuer", "Asset issuer does not exist"),
    // Path payments.
    code!("PathPaymentStrictReceiveMalformed", "Path payment is malformed"),
    code!("PathPaymentStrictReceiveUnderfunded", "Source balance cannot cover the send amount"),
    code!("PathPaymentStrictReceiveSrcNoTrust", "Source holds no trustline for the send asset"),
    code!("PathPaymentStrictReceiveSrcNotAuthorized", "Source not authorized for the send asset"),
    code!("PathPaymentStrictReceiveNoDestination", "Destination account does not exist"),
    code!("PathPaymentStrictReceiveNoTrust", "Destination holds no trustline for the asset"),
    code!("PathPaymentStrictReceiveNotAuthorized", "Destination not authorized for the asset"),
    code!("PathPaymentStrictReceiveLineFull", "Destination trustline limit would be exceeded"),
    code!("PathPaymentStrictReceiveNoIssuer", "An asset in the path has no issuer"),
    code!("PathPaymentStrictReceiveTooFewOffers", "Not enough offers to bridge the path"),
    code!("PathPaymentStrictReceiveOfferCrossSelf", "Path would cross one of the source's own offers"),
    code!("PathPaymentStrictReceiveOverSendmax", "Best path costs more than sendMax", "Raise sendMax or pick a different path"),
    code!("PathPaymentStrictSendMalformed", "Path payment is malformed"),
    code!("PathPaymentStrictSendUnderfunded", "Source balance cannot cover the send amount"),
    code!("PathPaymentStrictSendSrcNoTrust", "Source holds no trustline for the send asset"),
    code!("PathPaymentStrictSendSrcNotAuthorized", "Source not authorized for the send asset"),
    code!("PathPaymentStrictSendNoDestination", "Destination account does not exist"),
    code!("PathPaymentStrictSendNoTrust", "Destination holds no trustline for the asset"),
    code!("PathPaymentStrictSendNotAuthorized", "Destination not authorized for the asset"),
    code!("PathPaymentStrictSendLineFull", "Destination trustline limit would be exceeded"),
    code!("PathPaymentStrictSendNoIssuer", "An asset in the path has no issuer"),
    code!("PathPaymentStrictSendTooFewOffers", "Not enough offers to bridge the path"),
    code!("PathPaymentStrictSendOfferCrossSelf", "Path would cross one of the source's own offers"),
    code!("PathPaymentStrictSendUnderDestmin", "Best path delivers less than destMin", "Lower destMin or pick a different path"),
    // Offers.
    code!("ManageSellOfferMalformed", "Offer is malformed"),
    code!("ManageSellOfferSellNoTrust", "No trustline for the asset being sold"),
    code!("ManageSellOfferBuyNoTrust", "No trustline for the asset being bought"),
    code!("ManageSellOfferSellNotAuthorized", "Not authorized to sell this asset"),
    code!("ManageSellOfferBuyNotAuthorized", "Not authorized to buy this asset"),
    code!("ManageSellOfferLineFull", "Trustline limit would be exceeded by the buy"),
    code!("ManageSellOfferUnderfunded", "Insufficient balance of the asset being sold"),
    code!("ManageSellOfferCrossSelf", "Offer would cross one of the account's own offers"),
    code!("ManageSellOfferSellNoIssuer", "Sell-asset issuer does not exist"),
    code!("ManageSellOfferBuyNoIssuer", "Buy-asset issuer does not exist"),
    code!("ManageSellOfferNotFound", "Offer id not found for update or delete"),
    code!("ManageSellOfferLowReserve", "Creating the offer would drop below the reserve"),
    code!("ManageBuyOfferMalformed", "Offer is malformed"),
    code!("ManageBuyOfferUnderfunded", "Insufficient balance of the asset being sold"),
    code!("ManageBuyOfferNotFound", "Offer id not found for update or delete"),
    code!("ManageBuyOfferLowReserve", "Creating the offer would drop below the reserve"),
    // Trust.
    code!("ChangeTrustMalformed", "Trustline operation is malformed"),
    code!("ChangeTrustNoIssuer", "Asset issuer does not exist"),
    code!("ChangeTrustInvalidLimit", "Limit below the current balance or liabilities"),
    code!("ChangeTrustLowReserve", "Adding the trustline would drop below the reserve"),
    code!("ChangeTrustSelfNotAllowed", "Cannot trust your own asset"),
    code!("AllowTrustMalformed", "Allow-trust operation is malformed"),
    code!("AllowTrustNoTrustLine", "Trustor holds no trustline for the asset"),
    code!("AllowTrustTrustNotRequired", "Issuer does not require authorization"),
    code!("AllowTrustCantRevoke", "Issuer cannot revoke this authorization"),
    code!("SetTrustLineFlagsMalformed", "Trustline-flags operation is malformed"),
    code!("SetTrustLineFlagsNoTrustLine", "Trustor holds no trustline for the asset"),
    code!("SetTrustLineFlagsCantRevoke", "Revocation is not permitted for this issuer"),
    code!("SetTrustLineFlagsInvalidState", "Requested flag combination is invalid"),
    code!("SetTrustLineFlagsLowReserve", "Flag change would drop below the reserve"),
    // Account merge.
    code!("AccountMergeMalformed", "Account merge is malformed"),
    code!("AccountMergeNoAccount", "Destination account does not exist"),
    code!("AccountMergeImmutableSet", "Account has AUTH_IMMUTABLE set"),
    code!("AccountMergeHasSubEntries", "Account still owns trustlines, offers, or data"),
    code!("AccountMergeSeqnumTooFar", "Account sequence number too far in the future"),
    code!("AccountMergeDestFull", "Destination cannot receive the balance"),
    code!("AccountMergeIsSponsor", "Account still sponsors ledger entries"),
    // Sponsorship.
    code!("BeginSponsoringFutureReservesMalformed", "Sponsorship operation is malformed"),
    code!("BeginSponsoringFutureReservesAlreadySponsored", "Account is already sponsored"),
    code!("BeginSponsoringFutureReservesRecursive", "Sponsorship chains cannot recurse"),
    code!("EndSponsoringFutureReservesNotSponsored", "No sponsorship was in progress"),
    code!("RevokeSponsorshipDoesNotExist", "Sponsored entry does not exist"),
    code!("RevokeSponsorshipNotSponsor", "Caller is not the entry's sponsor"),
    code!("RevokeSponsorshipLowReserve", "Revoking would drop an account below the reserve"),
    code!("RevokeSponsorshipOnlyTransferable", "Entry sponsorship can only be transferred"),
    code!("RevokeSponsorshipMalformed", "Revoke-sponsorship operation is malformed"),
    // Clawback.
    code!("ClawbackMalformed", "Clawback operation is malformed"),
    code!("ClawbackNotClawbackEnabled", "Trustline is not clawback-enabled"),
    code!("ClawbackNoTrust", "Holder has no trustline for the asset"),
    code!("ClawbackUnderfunded", "Holder balance below the clawback amount"),
    // Soroban operations.
    code!("InvokeHostFunctionMalformed", "Host-function invocation is malformed"),
    code!(
        "InvokeHostFunctionTrapped",
        "Contract execution trapped",
        "Check the diagnostic events for the contract's failure point"
    ),
    code!(
        "InvokeHostFunctionResourceLimitExceeded",
        "Execution exceeded the declared resource limits",
        "Re-simulate and resubmit with a larger resource declaration"
    ),
    code!(
        "InvokeHostFunctionEntryArchived",
        "A required ledger entry has been archived",
        "Restore the entry's footprint before invoking"
    ),
    code!(
        "InvokeHostFunctionInsufficientRefundableFee",
        "Refundable fee was too small",
        "Raise the refundable fee budget"
    ),
    code!("ExtendFootprintTtlMalformed", "TTL-extension operation is malformed"),
    code!("ExtendFootprintTtlResourceLimitExceeded", "TTL extension exceeded resource limits"),
    code!("ExtendFootprintTtlInsufficientRefundableFee", "Refundable fee too small for the rent"),
    code!("RestoreFootprintMalformed", "Restore operation is malformed"),
    code!("RestoreFootprintResourceLimitExceeded", "Restore exceeded resource limits"),
    code!("RestoreFootprintInsufficientRefundableFee", "Refundable fee too small for the rent"),
    // Misc classic.
    code!("SetOptionsLowReserve", "Adding a signer would drop below the reserve"),
    code!("SetOptionsTooManySigners", "Signer limit reached"),
    code!("SetOptionsBadFlags", "Requested flags are invalid"),
    code!("SetOptionsInvalidInflation", "Inflation destination does not exist"),
    code!("SetOptionsCantChange", "Option cannot be changed"),
    code!("SetOptionsUnknownFlag", "Unknown flag bit set"),
    code!("SetOptionsThresholdOutOfRange", "Threshold out of range"),
    code!("SetOptionsBadSigner", "Signer is invalid"),
    code!("SetOptionsInvalidHomeDomain", "Home domain is invalid"),
    code!("ManageDataNotSupportedYet", "Data entries not supported by this ledger version"),
    code!("ManageDataNameNotFound", "Data entry to delete does not exist"),
    code!("ManageDataLowReserve", "Adding the data entry would drop below the reserve"),
    code!("ManageDataInvalidName", "Data entry name is invalid"),
    code!("BumpSequenceBadSeq", "Requested sequence number is out of range"),
    code!("InflationNotTime", "Inflation is not due yet"),
    code!("CreateClaimableBalanceMalformed", "Claimable balance is malformed"),
    code!("CreateClaimableBalanceLowReserve", "Reserve cannot cover the claimants"),
    code!("CreateClaimableBalanceNoTrust", "Source holds no trustline for the asset"),
    code!("CreateClaimableBalanceNotAuthorized", "Source not authorized for the asset"),
    code!("CreateClaimableBalanceUnderfunded", "Source balance below the amount"),
    code!("ClaimClaimableBalanceDoesNotExist", "Claimable balance does not exist"),
    code!("ClaimClaimableBalanceCannotClaim", "Claim predicate not satisfied"),
    code!("ClaimClaimableBalanceLineFull", "Claimant trustline limit would be exceeded"),
    code!("ClaimClaimableBalanceNoTrust", "Claimant holds no trustline for the asset"),
    code!("ClaimClaimableBalanceNotAuthorized", "Claimant not authorized for the asset"),
    code!("LiquidityPoolDepositMalformed", "Pool deposit is malformed"),
    code!("LiquidityPoolDepositNoTrust", "No trustline for a deposit asset"),
    code!("LiquidityPoolDepositNotAuthorized", "Not authorized for a deposit asset"),
    code!("LiquidityPoolDepositUnderfunded", "Balance below the deposit amount"),
    code!("LiquidityPoolDepositLineFull", "Pool-share trustline limit would be exceeded"),
    code!("LiquidityPoolDepositBadPrice", "Deposit price outside the given bounds"),
    code!("LiquidityPoolDepositPoolFull", "Pool has reached its maximum size"),
    code!("LiquidityPoolWithdrawMalformed", "Pool withdrawal is malformed"),
    code!("LiquidityPoolWithdrawNoTrust", "No trustline for the pool share"),
    code!("LiquidityPoolWithdrawUnderfunded", "Pool-share balance below the withdrawal"),
    code!("LiquidityPoolWithdrawLineFull", "A receiving trustline limit would be exceeded"),
    code!("LiquidityPoolWithdrawUnderMinimum", "Withdrawal below the requested minimum"),
];
