use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use inplace_value::Capability;
use inplace_value::FromFn;
use inplace_value::InplaceValue;
use static_assertions::assert_impl_all;
use static_assertions::assert_not_impl_any;

assert_not_impl_any!(InplaceValue<(), String>: Send, Sync, Clone);
assert_impl_all!(InplaceValue<(), String>: std::fmt::Debug);

#[test]
fn test_method() {
    struct MyStruct(i32);

    impl Capability<i32> for MyStruct {
        type Output = i32;

        fn invoke(&self, factor: i32) -> i32 {
            self.0 * factor
        }
    }

    let direct = MyStruct(21).invoke(2);

    let b = InplaceValue::<i32, i32, 8>::new(MyStruct(21));
    assert_eq!(b.invoke(2), direct);
    assert_eq!(b.invoke(2), 42);
}

#[test]
fn test_drop() {
    struct MyStruct {
        drop_count: Arc<AtomicU64>,
    }

    impl Capability for MyStruct {
        type Output = ();

        fn invoke(&self, _: ()) {}
    }

    impl Drop for MyStruct {
        fn drop(&mut self) {
            self.drop_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    let drop_count = Arc::new(AtomicU64::new(0));

    let v = MyStruct {
        drop_count: drop_count.clone(),
    };
    assert_eq!(0, drop_count.load(Ordering::Relaxed));

    {
        let _f = InplaceValue::<(), (), 16>::new(v);
    }
    assert_eq!(1, drop_count.load(Ordering::Relaxed), "drop is called");

    let v = MyStruct {
        drop_count: drop_count.clone(),
    };
    {
        let f = InplaceValue::<(), (), 16>::new(v);
        // A plain Rust move does not drop.
        let g = f;
        assert_eq!(1, drop_count.load(Ordering::Relaxed));
        drop(g);
    }
    assert_eq!(2, drop_count.load(Ordering::Relaxed), "drop is called once");
}

/// Put various types into one vec
#[test]
fn test_erase_type() {
    struct MyStruct1(i32);
    impl Capability for MyStruct1 {
        type Output = i32;
        fn invoke(&self, _: ()) -> i32 {
            self.0
        }
    }

    struct MyStruct2(i32);
    impl Capability for MyStruct2 {
        type Output = i32;
        fn invoke(&self, _: ()) -> i32 {
            self.0 * 2
        }
    }

    let arr: Vec<InplaceValue<(), i32, 4>> = vec![
        InplaceValue::new(MyStruct1(1)),
        InplaceValue::new(MyStruct2(2)),
        InplaceValue::new(FromFn(|()| 7i32)),
    ];

    let result = arr.into_iter().map(|b| b.invoke(())).collect::<Vec<_>>();

    assert_eq!(result, vec![1, 4, 7]);
}

/// Round trip through the container must give the same output as calling the
/// payload directly, for payloads of different shapes.
#[test]
fn test_round_trip_dispatch() {
    #[derive(Clone)]
    struct Name(String);
    impl Capability<&'static str> for Name {
        type Output = String;
        fn invoke(&self, greeting: &'static str) -> String {
            format!("{}, {}", greeting, self.0)
        }
    }

    #[derive(Clone)]
    struct Repeat {
        word: &'static str,
        times: usize,
    }
    impl Capability<&'static str> for Repeat {
        type Output = String;
        fn invoke(&self, sep: &'static str) -> String {
            vec![self.word; self.times].join(sep)
        }
    }

    #[derive(Clone, Copy)]
    #[repr(align(16))]
    struct Aligned(u128);
    impl Capability<&'static str> for Aligned {
        type Output = String;
        fn invoke(&self, prefix: &'static str) -> String {
            format!("{}{:x}", prefix, self.0)
        }
    }

    type Value = InplaceValue<&'static str, String, 32>;

    let name = Name("world".to_string());
    let repeat = Repeat {
        word: "la",
        times: 3,
    };
    let aligned = Aligned(0xbeef);

    let cases: Vec<(String, Value)> = vec![
        (name.invoke("hello"), InplaceValue::new(name.clone())),
        (repeat.invoke("hello"), InplaceValue::new(repeat.clone())),
        (aligned.invoke("hello"), InplaceValue::new(aligned)),
    ];

    for (want, v) in cases {
        assert_eq!(want, v.invoke("hello"));
    }
}

#[test]
fn test_nested_value() {
    let inner: InplaceValue<(), u8, 16> = InplaceValue::new(FromFn(|()| 9u8));
    let outer: InplaceValue<(), u8, 64> = InplaceValue::new(inner);

    assert_eq!(9, outer.invoke(()));
    assert!(outer.is::<InplaceValue<(), u8, 16>>());
}

/// Payload state behind `Cell`/`RefCell` lives in the inline storage itself and
/// is mutated through the shared reference `invoke` receives.
#[test]
fn test_interior_mutable_payload() {
    use std::cell::Cell;
    use std::cell::RefCell;

    struct Hits(Cell<u32>);

    impl Capability for Hits {
        type Output = u32;

        fn invoke(&self, _: ()) -> u32 {
            self.0.set(self.0.get() + 1);
            self.0.get()
        }
    }

    let mut v = InplaceValue::<(), u32, 16>::new(Hits(Cell::new(0)));
    assert_eq!(1, v.invoke(()));
    assert_eq!(2, v.invoke(()));
    assert_eq!(Some(2), v.downcast_ref::<Hits>().map(|h| h.0.get()));

    // State survives relocation into another container.
    let w = v.take();
    assert_eq!(3, w.invoke(()));
    assert_eq!(Ok(4), w.try_invoke(()));

    struct History(RefCell<[u8; 4]>);

    impl Capability<u8> for History {
        type Output = [u8; 4];

        fn invoke(&self, b: u8) -> [u8; 4] {
            let mut h = self.0.borrow_mut();
            h.rotate_left(1);
            h[3] = b;
            *h
        }
    }

    let h = InplaceValue::<u8, [u8; 4], 16>::new(History(RefCell::new([0; 4])));
    h.invoke(1);
    h.invoke(2);
    assert_eq!([0, 1, 2, 3], h.invoke(3));
}
