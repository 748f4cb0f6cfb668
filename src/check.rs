use std::fmt::Debug;

use thiserror::Error;

use crate::interface::list::List;

/// リストと期待列の照合に失敗したときのエラー
///
/// 再実行しなくても原因が分かるように、期待値と実際の値を両方持つ
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError<T: Debug> {
    /// 長さが一致しない
    #[error("Expected list of length {expected} but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// i番目の要素が一致しない
    #[error("Expected {expected:?} but got {actual:?} at index {index}")]
    ElementMismatch {
        index: usize,
        expected: T,
        actual: T,
    },
}

/// リストの内容が期待列と要素ごとに一致することを検証する
///
/// 長さが違えばLengthMismatch、要素が違えば最初に食い違った位置の
/// ElementMismatchを返す。照合のみでリストを変更しない
pub fn assert_sequence_eq<T, L>(list: &L, expected: &[T]) -> Result<(), CheckError<T>>
where
    T: Clone + PartialEq + Debug,
    L: List<T>,
{
    if list.size() != expected.len() {
        return Err(CheckError::LengthMismatch {
            expected: expected.len(),
            actual: list.size(),
        });
    }
    for (i, want) in expected.iter().enumerate() {
        match list.get(i) {
            Ok(got) if got == *want => {}
            Ok(got) => {
                return Err(CheckError::ElementMismatch {
                    index: i,
                    expected: want.clone(),
                    actual: got,
                });
            }
            // size()と実際に辿れる長さが食い違っている
            Err(_) => {
                return Err(CheckError::LengthMismatch {
                    expected: expected.len(),
                    actual: i,
                });
            }
        }
    }
    Ok(())
}
