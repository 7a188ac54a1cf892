/*!
# The Tape Language

A program is a flat sequence of statements. Each statement writes cells
onto a single tape, in the order they appear. Nothing is compiled into a
separate form; the tape is the program and its data at once.

## Labels

A label names the next cell the tape will hand out.

```text
x: 2
y: 3
```

`x` names the cell holding `2.0` and `y` the cell holding `3.0`. A label
placed in front of a formula names the formula's result.

```text
z: *(x, y)
```

## Formulas

Formulas are written prefix with a parenthesized argument list.

| Form       | Result                             |
|------------|------------------------------------|
| `*(a, b)`  | a times b                          |
| `+(a, b)`  | a plus b                           |
| `^(a, b)`  | a raised to b                      |
| `<(a, b)`  | `1` when a is less than b, else `-1` |

Arguments are names, dotted paths, numbers or strings. Literal arguments
are placed on the tape right after the formula that uses them.

The forms `&(a)` and `>dest(args)` are accepted and laid out on the tape
but do nothing when evaluated.

## Assignment and renaming

`a = b` copies the cell named `b` into the cell named `a` on every scan.
Both names must already exist.

`a := b` gives the cell named `b` a second name without writing anything.
`a := 5` writes `5` and names it `a`. The new name cannot be dotted.

## Blocks

`name {` opens a block and labels the cell at the cursor. `}` closes it.
Labels declared inside a block are hidden from plain names once the block
closes, but stay reachable as members.

```text
rec {
    a: 1
    inner {
        b: 2
    }
}
total: +(rec.a, rec.inner.b)
```

Inside a block a name can shadow one from outside; the outer one comes
back when the block closes.

## Streams

`value | name` writes a value to the stream `name` every time a snapshot
is taken. `` `value `` is short for `value | out`. Strings render as text
and anything else as a number.

```text
"hello" | out
z | log
```

## Evaluation

Every formula on the tape is evaluated once per scan. Scans repeat until
one of them leaves every cell as it was, or the scan budget runs out.
With a cycle such as

```text
x: 1
neg: -1
flip: *(x, neg)
x = flip
```

no scan is ever clean and the run stops when the budget is spent.

Comments run from `//` to the end of the line.

*/
