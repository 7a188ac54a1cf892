/*!
# Error Messages

Assembly stops at the first error. The message names the error, the
source line, the columns of the offending token and a short detail.

```text
UNRESOLVED SYMBOL IN 2 (0..1); y
```

## UNRESOLVED SYMBOL
A name was used that no label ever declared.

## OUT OF SCOPE
The name exists but only inside a block that has closed. Reach it
through the block with a dotted path instead.

## UNKNOWN MEMBER
A dotted path named something not declared after the block's label.
The search gives up once it reaches labels shallower than where the
path is written, one level deeper for each part after the first.

## INVALID RENAME TARGET
The left side of `:=` was a dotted path.

## WRONG NUMBER OF ARGUMENTS
A formula got a different number of arguments than it takes.

## UNTERMINATED LITERAL
A string was still open at the end of the source.

## UNKNOWN ESCAPE
A backslash in a string was followed by something other than
`n`, `t`, `r`, `0`, `\` or `"`.

## IMBALANCED SCOPE
A `}` had no block to close.

## UNCLOSED SCOPE
The source ended with a block still open.

## UNEXPECTED TOKEN
Anything else the assembler could not make sense of.

## TAPE OVERFLOW
The program does not fit on the tape. Raise `GOTOPE_CAPACITY`.

*/
