//! Header names of the global finance dataset

pub const COUNTRY: &str = "Country";
pub const DATE: &str = "Date";
pub const CREDIT_RATING: &str = "Credit_Rating";
pub const CURRENCY_CODE: &str = "Currency_Code";
pub const STOCK_INDEX: &str = "Stock_Index";

pub const GDP_GROWTH: &str = "GDP_Growth_Rate_Percent";
pub const INFLATION: &str = "Inflation_Rate_Percent";
pub const MARKET_CAP: &str = "Market_Cap_Trillion_USD";
pub const BOND_YIELD_10Y: &str = "Bond_Yield_10Y_Percent";
