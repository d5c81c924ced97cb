//! 列表统计
//!
//! 空列表的所有统计值都为 0。

/// 饱和求和，远端返回的超大计数不会溢出
pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> i64) -> i64 {
    items
        .iter()
        .map(value)
        .fold(0i64, |total, v| total.saturating_add(v))
}

pub fn sum_by_f64<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

pub fn count_where<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| predicate(item)).count()
}

/// 平均值四舍五入到整数
pub fn average_rounded<T>(items: &[T], value: impl Fn(&T) -> i64) -> i64 {
    if items.is_empty() {
        return 0;
    }
    let total = sum_by(items, value) as f64;
    (total / items.len() as f64).round() as i64
}

/// 金额保留两位小数
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
