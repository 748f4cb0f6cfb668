use crate::error::ListError;

/// 値の列x(0)..x(n-1)とその列に対する位置指定の操作からなる
///
/// 添字を受け取る操作は、範囲外の添字に対して
/// [`ListError::IndexOutOfRange`]を返す
pub trait List<T> {
    /// リストの長さnを返す
    fn size(&self) -> usize;

    /// リストが空かどうかを返す
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// x(i)の値を返す
    fn get(&self, i: usize) -> Result<T, ListError>;

    /// x(i)の値をxにし、元の値を返す
    fn set(&mut self, i: usize, x: T) -> Result<T, ListError>;

    /// xを末尾に追加する
    fn add(&mut self, x: T);

    /// x(i)を削除し、その値を返す
    fn remove(&mut self, i: usize) -> Result<T, ListError>;
}
