use bdm_core::{Array, BlockShape, PartitionIgnore, Partitioner};
use proptest::prelude::*;

/// Array whose digits are their own row-major index
fn indexed(shape: Vec<usize>) -> Array {
    let len = shape.iter().product::<usize>();
    Array::new(shape, (0..len as u32).collect()).unwrap()
}

/// Multi-index of a row-major position
fn unravel(mut pos: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (i, &dim) in shape.iter().enumerate().rev() {
        index[i] = pos % dim;
        pos /= dim;
    }
    index
}

fn divisible_shape() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..=4, 1usize..=3).prop_flat_map(|(width, ndim)| {
        (
            Just(width),
            prop::collection::vec((1usize..=4).prop_map(move |k| k * width), ndim),
        )
    })
}

fn any_shape() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..=4, prop::collection::vec(1usize..=10, 1..=3))
}

proptest! {
    #[test]
    fn divisible_arrays_are_covered_exactly((width, shape) in divisible_shape()) {
        let array = indexed(shape.clone());
        let part = PartitionIgnore::new(BlockShape::symmetric(shape.len(), width).unwrap());

        let mut seen = Vec::new();
        let mut total = 0;
        for block in part.partition(array.view()).unwrap() {
            prop_assert!(part.block_shape().matches(block.shape()));
            total += block.len();
            seen.extend(block.iter());
        }
        prop_assert_eq!(total, array.len());

        seen.sort_unstable();
        prop_assert_eq!(seen.as_slice(), array.as_slice());
    }

    #[test]
    fn leftovers_are_dropped((width, shape) in any_shape()) {
        let array = indexed(shape.clone());
        let part = PartitionIgnore::new(BlockShape::symmetric(shape.len(), width).unwrap());
        let covered: Vec<usize> = shape.iter().map(|&dim| dim / width * width).collect();

        let mut seen = Vec::new();
        for block in part.partition(array.view()).unwrap() {
            prop_assert!(part.block_shape().matches(block.shape()));
            for digit in block.iter() {
                let index = unravel(digit as usize, &shape);
                prop_assert!(index.iter().zip(&covered).all(|(i, limit)| i < limit));
                seen.push(digit);
            }
        }

        let expected: usize = covered.iter().product();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), expected);
    }
}
