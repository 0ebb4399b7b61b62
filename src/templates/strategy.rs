use super::{TemplateCategory, TemplateEntry};

const MA_CROSSOVER: &str = r#"//@version=5
strategy("Moving Average Crossover Strategy", overlay=true, initial_capital=10000, default_qty_type=strategy.percent_of_equity, default_qty_value=10)

// Inputs
fastLength = input(9, title="Fast MA Length")
slowLength = input(21, title="Slow MA Length")
maType = input.string("EMA", title="MA Type", options=["SMA", "EMA"])

// Moving averages
ma(src, len) => maType == "EMA" ? ta.ema(src, len) : ta.sma(src, len)
fastMA = ma(close, fastLength)
slowMA = ma(close, slowLength)

// Signals
longCondition = ta.crossover(fastMA, slowMA)
shortCondition = ta.crossunder(fastMA, slowMA)

if longCondition
    strategy.entry("Long", strategy.long)
if shortCondition
    strategy.entry("Short", strategy.short)

plot(fastMA, title="Fast MA", color=color.blue)
plot(slowMA, title="Slow MA", color=color.red)
"#;

const RSI_MEAN_REVERSION: &str = r#"//@version=5
strategy("RSI Mean Reversion Strategy", overlay=false, initial_capital=10000, default_qty_type=strategy.percent_of_equity, default_qty_value=10)

// Inputs
rsiLength = input.int(14, title="RSI Length", minval=1)
oversold = input.int(30, title="Oversold Level", minval=1, maxval=50)
overbought = input.int(70, title="Overbought Level", minval=50, maxval=99)

rsi = ta.rsi(close, rsiLength)

// Enter when RSI leaves an extreme, exit at the midline
if ta.crossover(rsi, oversold)
    strategy.entry("Long", strategy.long)
if ta.crossunder(rsi, overbought)
    strategy.entry("Short", strategy.short)
if strategy.position_size > 0 and rsi > 50
    strategy.close("Long")
if strategy.position_size < 0 and rsi < 50
    strategy.close("Short")

plot(rsi, title="RSI", color=color.purple)
hline(oversold, "Oversold", color=color.green)
hline(overbought, "Overbought", color=color.red)
"#;

const MACD_MOMENTUM: &str = r#"//@version=5
strategy("MACD Momentum Strategy", overlay=false, initial_capital=10000, default_qty_type=strategy.percent_of_equity, default_qty_value=10)

// Inputs
fastLength = input.int(12, title="Fast Length", minval=1)
slowLength = input.int(26, title="Slow Length", minval=1)
signalLength = input.int(9, title="Signal Length", minval=1)

[macdLine, signalLine, histogram] = ta.macd(close, fastLength, slowLength, signalLength)

if ta.crossover(macdLine, signalLine) and macdLine < 0
    strategy.entry("Long", strategy.long)
if ta.crossunder(macdLine, signalLine) and macdLine > 0
    strategy.entry("Short", strategy.short)

plot(macdLine, title="MACD", color=color.blue)
plot(signalLine, title="Signal", color=color.orange)
plot(histogram, title="Histogram", style=plot.style_columns, color=histogram >= 0 ? color.green : color.red)
"#;

const BOLLINGER_BREAKOUT: &str = r#"//@version=5
strategy("Bollinger Bands Breakout Strategy", overlay=true, initial_capital=10000, default_qty_type=strategy.percent_of_equity, default_qty_value=10)

// Inputs
length = input.int(20, title="BB Length", minval=1)
mult = input.float(2.0, title="StdDev Multiplier", minval=0.1, step=0.1)

[basis, upper, lower] = ta.bb(close, length, mult)

// Breakouts beyond the bands, exit on return to the basis
if ta.crossover(close, upper)
    strategy.entry("Long", strategy.long)
if ta.crossunder(close, lower)
    strategy.entry("Short", strategy.short)
if strategy.position_size > 0 and close < basis
    strategy.close("Long")
if strategy.position_size < 0 and close > basis
    strategy.close("Short")

plot(basis, title="Basis", color=color.orange)
plot(upper, title="Upper", color=color.blue)
plot(lower, title="Lower", color=color.blue)
"#;

const BASIC_STRATEGY: &str = r#"//@version=5
strategy("My Strategy", overlay=true, initial_capital=10000, default_qty_type=strategy.percent_of_equity, default_qty_value=10)

// Inputs
length = input.int(14, title="Length", minval=1)

// Entry and exit conditions
longCondition = close > ta.sma(close, length)
exitCondition = close < ta.sma(close, length)

if longCondition
    strategy.entry("Long", strategy.long)
if exitCondition
    strategy.close("Long")
"#;

pub(super) fn entries() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry {
            category: TemplateCategory::Strategy,
            canonical_name: "Moving Average Crossover",
            aliases: &[
                "ma cross",
                "ma crossover",
                "sma cross",
                "ema cross",
                "golden cross",
                "crossover",
            ],
            body: MA_CROSSOVER,
        },
        TemplateEntry {
            category: TemplateCategory::Strategy,
            canonical_name: "RSI Mean Reversion",
            aliases: &["rsi", "rsi strategy", "mean reversion", "oversold overbought"],
            body: RSI_MEAN_REVERSION,
        },
        TemplateEntry {
            category: TemplateCategory::Strategy,
            canonical_name: "MACD Momentum",
            aliases: &["macd", "macd strategy", "momentum"],
            body: MACD_MOMENTUM,
        },
        TemplateEntry {
            category: TemplateCategory::Strategy,
            canonical_name: "Bollinger Breakout",
            aliases: &["bollinger", "bollinger bands", "bb breakout", "breakout"],
            body: BOLLINGER_BREAKOUT,
        },
    ]
}

pub(super) fn fallback() -> TemplateEntry {
    TemplateEntry {
        category: TemplateCategory::Strategy,
        canonical_name: "Basic Strategy",
        aliases: &[],
        body: BASIC_STRATEGY,
    }
}
