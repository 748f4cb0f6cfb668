use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::{Rc, Weak};

use crate::error::ListError;
use crate::interface::list::List;

type StrongLink<T> = Rc<RefCell<Node<T>>>;
type WeakLink<T> = Weak<RefCell<Node<T>>>;

pub struct Node<T> {
    x: T,
    next: Option<StrongLink<T>>,
    prev: Option<WeakLink<T>>,
}

impl<T> Node<T> {
    fn new(x: T) -> Self {
        Self {
            x,
            next: None,
            prev: None,
        }
    }
}

/// 双方向連結リスト
///
/// Listインタフェースに加えて任意の位置への挿入insert(i, x)を提供する
/// get_linkはiがn/2より小さければheadから、そうでなければtailから辿るので
/// 位置指定の操作の実行時間はO(min(i, n-i))
///
/// ノードを所有するのは前方向のリンク(headと各ノードのnext)だけで、
/// prevとtailはナビゲーション用の弱参照
pub struct DLList<T> {
    head: Option<StrongLink<T>>,
    tail: Option<WeakLink<T>>,
    n: usize,
}

impl<T> DLList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            n: 0,
        }
    }

    /// i番目のノードを返す。iが範囲外ならNone
    fn get_link(&self, i: usize) -> Option<StrongLink<T>> {
        if i >= self.n {
            return None;
        }
        if i < self.n / 2 {
            // 前から辿る
            let mut p = self.head.clone();
            for _ in 0..i {
                p = p.and_then(|u| u.as_ref().borrow().next.clone());
            }
            p
        } else {
            // 後ろから辿る
            let mut p = self.tail.as_ref().and_then(Weak::upgrade);
            for _ in i..self.n - 1 {
                p = p.and_then(|u| {
                    u.as_ref()
                        .borrow()
                        .prev
                        .clone()
                        .and_then(|w| w.upgrade())
                });
            }
            p
        }
    }

    fn push_back(&mut self, x: T) {
        let u = Rc::new(RefCell::new(Node::new(x)));
        match self.tail.as_ref().and_then(Weak::upgrade) {
            Some(t) => {
                u.as_ref().borrow_mut().prev = Some(Rc::downgrade(&t));
                t.as_ref().borrow_mut().next = Some(Rc::clone(&u));
            }
            None => self.head = Some(Rc::clone(&u)),
        }
        self.tail = Some(Rc::downgrade(&u));
        self.n += 1;
    }

    /// xをi番目として挿入し、x(i)..x(n-1)を後ろにずらす
    ///
    /// iにはn(末尾への追加)まで指定できる。nを超える添字はエラー
    pub fn insert(&mut self, i: usize, x: T) -> Result<(), ListError> {
        if i == self.n {
            self.push_back(x);
            return Ok(());
        }
        // i < n: i番目のノードの直前に挿入する
        let w = self.get_link(i).ok_or(ListError::out_of_range(i, self.n))?;
        let u = Rc::new(RefCell::new(Node::new(x)));
        let prev = w.as_ref().borrow_mut().prev.take();
        match prev.as_ref().and_then(Weak::upgrade) {
            Some(p) => {
                u.as_ref().borrow_mut().prev = Some(Rc::downgrade(&p));
                u.as_ref().borrow_mut().next = p.as_ref().borrow_mut().next.take();
                p.as_ref().borrow_mut().next = Some(Rc::clone(&u));
            }
            None => {
                u.as_ref().borrow_mut().next = self.head.take();
                self.head = Some(Rc::clone(&u));
            }
        }
        w.as_ref().borrow_mut().prev = Some(Rc::downgrade(&u));
        self.n += 1;
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.clone(),
            _list: self,
        }
    }
}

impl<T> Default for DLList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> List<T> for DLList<T> {
    fn size(&self) -> usize {
        self.n
    }

    fn get(&self, i: usize) -> Result<T, ListError> {
        let u = self.get_link(i).ok_or(ListError::out_of_range(i, self.n))?;
        let x = u.as_ref().borrow().x.clone();
        Ok(x)
    }

    fn set(&mut self, i: usize, x: T) -> Result<T, ListError> {
        let u = self.get_link(i).ok_or(ListError::out_of_range(i, self.n))?;
        let y = std::mem::replace(&mut u.as_ref().borrow_mut().x, x);
        Ok(y)
    }

    fn add(&mut self, x: T) {
        self.push_back(x);
    }

    fn remove(&mut self, i: usize) -> Result<T, ListError> {
        let w = self.get_link(i).ok_or(ListError::out_of_range(i, self.n))?;
        let prev = w.as_ref().borrow_mut().prev.take();
        let next = w.as_ref().borrow_mut().next.take();
        match next.as_ref() {
            Some(v) => v.as_ref().borrow_mut().prev = prev.clone(),
            // 末尾を削除した場合はtailを一つ前に移す
            None => self.tail = prev.clone(),
        }
        match prev.and_then(|p| p.upgrade()) {
            Some(p) => p.as_ref().borrow_mut().next = next,
            None => self.head = next,
        }
        self.n -= 1;
        if self.n == 0 {
            // 空になったらheadとtailを必ず初期状態に戻す
            self.head = None;
            self.tail = None;
        }
        Ok(take_value(w))
    }
}

/// リンクを外したノードから値を取り出す
fn take_value<T>(u: StrongLink<T>) -> T {
    Rc::try_unwrap(u)
        .ok()
        .expect("node is not shared")
        .into_inner()
        .x
}

impl<T: Debug> fmt::Debug for DLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "head")?;
        let mut p = self.head.clone();
        while let Some(u) = p {
            let node = u.as_ref().borrow();
            write!(f, " <-> {:?}", node.x)?;
            p = node.next.clone();
        }
        write!(f, " <-> null")
    }
}

impl<T: Display> fmt::Display for DLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut p = self.head.clone();
        let mut first = true;
        while let Some(u) = p {
            let node = u.as_ref().borrow();
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

impl<T> Drop for DLList<T> {
    fn drop(&mut self) {
        // 再帰的なdropで深いリストがスタックを溢れさせないように先頭から外す
        self.tail = None;
        let mut p = self.head.take();
        while let Some(u) = p {
            p = u.as_ref().borrow_mut().next.take();
        }
    }
}

/// 先頭から順に値を複製して返すイテレータ
pub struct Iter<'a, T> {
    next: Option<StrongLink<T>>,
    _list: &'a DLList<T>,
}

impl<'a, T: Clone> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.next.take()?;
        let node = u.as_ref().borrow();
        self.next = node.next.clone();
        Some(node.x.clone())
    }
}

#[cfg(test)]
impl<T> DLList<T> {
    /// 全ノードについてnextとprevが互いに一致し、末尾がtailと一致すること
    fn assert_links_consistent(&self) {
        let mut count = 0;
        let mut prev: Option<StrongLink<T>> = None;
        let mut p = self.head.clone();
        while let Some(u) = p {
            let up = u.as_ref().borrow().prev.as_ref().and_then(Weak::upgrade);
            match (&prev, up) {
                (None, None) => {}
                (Some(q), Some(r)) => assert!(Rc::ptr_eq(q, &r)),
                _ => panic!("prev does not agree with the chain"),
            }
            count += 1;
            let next = u.as_ref().borrow().next.clone();
            prev = Some(u);
            p = next;
        }
        assert_eq!(count, self.n);
        match (&prev, self.tail.as_ref().and_then(Weak::upgrade)) {
            (None, None) => {}
            (Some(q), Some(r)) => assert!(Rc::ptr_eq(q, &r)),
            _ => panic!("tail does not agree with the chain"),
        }
    }
}
