// The two message families the bridge converts between. Both are declared
// against the same wire format; they agree on tags for every shared field.

pub mod external;
pub mod ledger;
