use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::{Rc, Weak};

use crate::error::ListError;
use crate::interface::list::List;

type Link<T> = Rc<RefCell<Node<T>>>;

pub struct Node<T> {
    x: T,
    next: Option<Link<T>>,
}

impl<T> Node<T> {
    fn new(x: T) -> Self {
        Self { x, next: None }
    }
}

impl<T: Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = &self.next {
            write!(f, "{:?} -> {:?}", self.x, n.borrow())
        } else {
            write!(f, "{:?}", self.x)
        }
    }
}

/// 単方向連結リスト
///
/// Listインタフェースを実装する
/// add(x)の実行時間はO(1)、get(i)/set(i,x)/remove(i)はO(i)
/// 末尾の削除では先頭から一つ前のノードまで辿る必要がある
///
/// 各ノードを強参照で所有するのは前のノードのnext(先頭のノードはhead)だけで、
/// tailは追加をO(1)にするための弱参照
pub struct SLList<T> {
    head: Option<Link<T>>,
    tail: Option<Weak<RefCell<Node<T>>>>,
    n: usize,
}

impl<T> SLList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            n: 0,
        }
    }

    /// i番目のノードを返す。iが範囲外ならNone
    fn get_link(&self, i: usize) -> Option<Link<T>> {
        if i >= self.n {
            return None;
        }
        let mut p = self.head.clone();
        for _ in 0..i {
            p = p.and_then(|u| u.borrow().next.clone());
        }
        p
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.clone(),
            _list: self,
        }
    }
}

impl<T> Default for SLList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> List<T> for SLList<T> {
    fn size(&self) -> usize {
        self.n
    }

    fn get(&self, i: usize) -> Result<T, ListError> {
        let u = self.get_link(i).ok_or(ListError::out_of_range(i, self.n))?;
        let x = u.borrow().x.clone();
        Ok(x)
    }

    fn set(&mut self, i: usize, x: T) -> Result<T, ListError> {
        let u = self.get_link(i).ok_or(ListError::out_of_range(i, self.n))?;
        let y = std::mem::replace(&mut u.borrow_mut().x, x);
        Ok(y)
    }

    fn add(&mut self, x: T) {
        let node = Rc::new(RefCell::new(Node::new(x)));
        if self.n == 0 {
            self.head = Some(Rc::clone(&node));
        } else if let Some(t) = self.tail.as_ref().and_then(Weak::upgrade) {
            t.borrow_mut().next = Some(Rc::clone(&node));
        }
        self.tail = Some(Rc::downgrade(&node));
        self.n += 1;
    }

    fn remove(&mut self, i: usize) -> Result<T, ListError> {
        if i >= self.n {
            return Err(ListError::out_of_range(i, self.n));
        }
        let u = if i == 0 {
            let u = self.head.take().ok_or(ListError::out_of_range(i, self.n))?;
            self.head = u.borrow_mut().next.take();
            u
        } else {
            let prev = self
                .get_link(i - 1)
                .ok_or(ListError::out_of_range(i, self.n))?;
            let u = prev
                .borrow_mut()
                .next
                .take()
                .ok_or(ListError::out_of_range(i, self.n))?;
            let next = u.borrow_mut().next.take();
            if next.is_none() {
                // 末尾を削除した場合はtailを一つ前に移す
                self.tail = Some(Rc::downgrade(&prev));
            }
            prev.borrow_mut().next = next;
            u
        };
        self.n -= 1;
        if self.n == 0 {
            // 空になったらheadとtailを必ず初期状態に戻す
            self.head = None;
            self.tail = None;
        }
        Ok(take_value(u))
    }
}

/// リンクを外したノードから値を取り出す
fn take_value<T>(u: Link<T>) -> T {
    Rc::try_unwrap(u)
        .ok()
        .expect("node is not shared")
        .into_inner()
        .x
}

impl<T: Debug> fmt::Debug for SLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(u) = &self.head {
            write!(f, "head -> {:?}", u.borrow())
        } else {
            write!(f, "null")
        }
    }
}

impl<T: Display> fmt::Display for SLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut p = self.head.clone();
        let mut first = true;
        while let Some(u) = p {
            let node = u.borrow();
            if first {
                write!(f, "{}", node.x)?;
                first = false;
            } else {
                write!(f, ", {}", node.x)?;
            }
            p = node.next.clone();
        }
        write!(f, "}}")
    }
}

impl<T> Drop for SLList<T> {
    fn drop(&mut self) {
        // 再帰的なdropで深いリストがスタックを溢れさせないように先頭から外す
        let mut p = self.head.take();
        while let Some(u) = p {
            p = u.borrow_mut().next.take();
        }
    }
}

/// 先頭から順に値を複製して返すイテレータ
pub struct Iter<'a, T> {
    next: Option<Link<T>>,
    _list: &'a SLList<T>,
}

impl<'a, T: Clone> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.next.take()?;
        let node = u.borrow();
        self.next = node.next.clone();
        Some(node.x.clone())
    }
}

#[cfg(test)]
impl<T> SLList<T> {
    /// headからnext経由でn個のノードに到達し、最後のノードがtailと一致すること
    fn assert_links_consistent(&self) {
        let mut count = 0;
        let mut last: Option<Link<T>> = None;
        let mut p = self.head.clone();
        while let Some(u) = p {
            count += 1;
            let next = u.borrow().next.clone();
            last = Some(u);
            p = next;
        }
        assert_eq!(count, self.n);
        match (&last, self.tail.as_ref().and_then(Weak::upgrade)) {
            (None, None) => {}
            (Some(l), Some(t)) => assert!(Rc::ptr_eq(l, &t)),
            _ => panic!("tail does not agree with the chain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::assert_sequence_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        let list: SLList<i32> = SLList::new();
        assert_eq!(list.size(), 0);
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "{}");
        assert_sequence_eq(&list, &[]).unwrap();
        list.assert_links_consistent();
    }

    #[test]
    fn test_add_and_get() {
        let mut list = SLList::new();
        for i in 0..3 {
            list.add(i * i);
        }
        assert_eq!(list.size(), 3);
        assert_eq!(list.get(0), Ok(0));
        assert_eq!(list.get(1), Ok(1));
        assert_eq!(list.get(2), Ok(4));
        assert_sequence_eq(&list, &[0, 1, 4]).unwrap();
        list.assert_links_consistent();
    }

    #[test]
    fn test_remove_middle() {
        let mut list = SLList::new();
        for i in 0..5 {
            list.add(i * i);
        }
        assert_eq!(list.remove(1), Ok(1));
        assert_eq!(list.remove(2), Ok(9));
        assert_sequence_eq(&list, &[0, 4, 16]).unwrap();
        list.assert_links_consistent();
    }

    #[test]
    fn test_remove_until_empty_and_refill() {
        let mut list = SLList::new();
        for i in 0..5 {
            list.add(i * i);
        }
        list.remove(1).unwrap();
        list.remove(2).unwrap();

        // 残りを先頭から全て削除する
        list.remove(0).unwrap();
        list.remove(0).unwrap();
        list.remove(0).unwrap();
        assert_sequence_eq(&list, &[]).unwrap();
        list.assert_links_consistent();

        // 空にした後もtailが残っておらず、末尾の扱いに問題がないこと
        for i in 0..5 {
            list.add(i * i);
        }
        list.remove(4).unwrap();
        list.add(-1);
        assert_sequence_eq(&list, &[0, 1, 4, 9, -1]).unwrap();
        list.assert_links_consistent();
    }

    #[test]
    fn test_many_adds() {
        let mut list = SLList::new();
        for i in 0..12 {
            list.add(i * i);
        }
        let answer = [0, 1, 4, 9, 16, 25, 36, 49, 64, 81, 100, 121];
        assert_sequence_eq(&list, &answer).unwrap();
        list.assert_links_consistent();
    }

    #[test]
    fn test_remove_head_shifts() {
        let mut list = SLList::new();
        for x in ["a", "b", "c"] {
            list.add(x);
        }
        assert_eq!(list.remove(0), Ok("a"));
        assert_eq!(list.get(0), Ok("b"));
        assert_eq!(list.size(), 2);
        list.assert_links_consistent();
    }

    #[test]
    fn test_out_of_range() {
        let mut list = SLList::new();
        for i in 0..3 {
            list.add(i);
        }
        let err = ListError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(list.get(3), Err(err));
        assert_eq!(list.set(3, 9), Err(err));
        assert_eq!(list.remove(3), Err(err));
        assert_eq!(list.size(), 3);

        let mut empty: SLList<i32> = SLList::new();
        let err = ListError::IndexOutOfRange { index: 0, len: 0 };
        assert_eq!(empty.get(0), Err(err));
        assert_eq!(empty.remove(0), Err(err));
    }

    #[test]
    fn test_set() {
        let mut list = SLList::new();
        for x in "abc".chars() {
            list.add(x);
        }
        assert_eq!(list.set(1, 'x'), Ok('b'));
        assert_sequence_eq(&list, &['a', 'x', 'c']).unwrap();
    }

    #[test]
    fn test_to_string() {
        let mut list = SLList::new();
        for i in 0..3 {
            list.add(i * i);
        }
        assert_eq!(list.to_string(), "{0, 1, 4}");
    }

    #[test]
    fn test_iter() {
        let mut list = SLList::new();
        for i in 0..4 {
            list.add(i * 2);
        }
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![0, 2, 4, 6]);
    }
}
